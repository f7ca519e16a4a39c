// SPDX-License-Identifier: MPL-2.0
//! iced rendering of the toast stack.
//!
//! - [`toast`] - A single toast card with close control and countdown bar
//! - [`overlay`] - Full-window layer positioning every measured card
//! - [`measure`] - Wrapper that reports a card's laid-out size
//! - [`subscription`] - Tick, keyboard, click and resize events for the orchestrator
//! - [`style`] - Registry of shared animation keyframes
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod measure;
pub mod overlay;
pub mod style;
pub mod subscription;
pub mod toast;
