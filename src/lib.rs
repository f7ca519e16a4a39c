// SPDX-License-Identifier: MPL-2.0
//! `iced_toasts` manages short-lived notification cards for iced applications.
//!
//! The [`toast`] module holds the lifecycle engine: the store of active
//! toasts, their auto-dismiss countdowns, and placement against an anchor.
//! [`ui`] renders the stack with iced widgets and [`app`] is a small demo
//! that wires everything together.

#![doc(html_root_url = "https://docs.rs/iced_toasts/0.1.0")]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod toast;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
