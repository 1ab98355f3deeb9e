//! The calculator page: expression field, keypad, analyzer, output area and the
//! session that ties them together.
//!
//!# Example
//! ```
//! use std::time::Instant;
//! use RustedPartials::calculator::session::CalculatorSession;
//! let mut session = CalculatorSession::default();
//! session.type_text("x^2 + y");
//! session.submit(Instant::now());
//! assert_eq!(session.output(), &["∂/∂x: 2 * x", "∂/∂y: 1"]);
//! ```
/// text buffer with a cursor
pub mod input_editor;
/// keys with their literal payloads
pub mod keypad;
/// validation and free-variable extraction
pub mod expression_analyzer;
/// one derivative per variable, output lines, error animation of the display regions
pub mod derivative_presenter;
pub mod error_flash;
/// single click deletes one character, double click clears all
pub mod clear_gesture;
pub mod session;
