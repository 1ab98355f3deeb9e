//! One calculator page: the expression field, the output area and the state
//! machine between them.
//!
//! ```text
//! Idle --submit, valid, >= 1 variable--> ResultsShown
//! Idle --submit, valid, no variable----> NoVariableMessage
//! Idle --submit, invalid---------------> ErrorFlash --flash elapsed (tick)--> Idle
//! any  --edit--------------------------> Idle, output cleared
//! ```
use std::time::Instant;

use log::{info, warn};

use crate::calculator::clear_gesture::{ClearAction, ClearGesture};
use crate::calculator::derivative_presenter::{
    DerivativeMap, DerivativePresenter, Region, RegionState, compute_all,
};
use crate::calculator::expression_analyzer::{extract_variables, validate};
use crate::calculator::input_editor::InputEditor;
use crate::calculator::keypad::Key;
use crate::symbolic::symbolic_errors::InvalidExpression;
use crate::symbolic::symbolic_traits::{NativeEngine, SymbolicEngine};
use crate::Utils::config::CalculatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ResultsShown,
    NoVariableMessage,
    ErrorFlash,
}

pub struct CalculatorSession<E: SymbolicEngine = NativeEngine> {
    editor: InputEditor,
    presenter: DerivativePresenter,
    clear_gesture: ClearGesture,
    engine: E,
    config: CalculatorConfig,
    state: SessionState,
}

impl Default for CalculatorSession<NativeEngine> {
    fn default() -> Self {
        CalculatorSession::new(CalculatorConfig::default())
    }
}

impl CalculatorSession<NativeEngine> {
    pub fn new(config: CalculatorConfig) -> Self {
        CalculatorSession::with_engine(config, NativeEngine)
    }
}

impl<E: SymbolicEngine> CalculatorSession<E> {
    pub fn with_engine(config: CalculatorConfig, engine: E) -> Self {
        CalculatorSession {
            editor: InputEditor::new(),
            presenter: DerivativePresenter::new(&config),
            clear_gesture: ClearGesture::new(config.double_click),
            engine,
            config,
            state: SessionState::Idle,
        }
    }

    /// Every edit drops what the output area shows.
    fn after_edit(&mut self) {
        self.presenter.clear();
        self.state = SessionState::Idle;
    }

    /// Type text at the cursor, as the keyboard would. The cursor ends after the text.
    pub fn type_text(&mut self, text: &str) {
        self.editor.type_at_cursor(text);
        self.after_edit();
    }

    /// Keypad press: the label goes in with the keypad cursor rule.
    pub fn press_key(&mut self, key: Key) {
        self.editor.insert_at_cursor(key.payload());
        self.after_edit();
    }

    /// One click on the clear control. Returns what the click did.
    pub fn press_clear(&mut self, now: Instant) -> ClearAction {
        let action = self.clear_gesture.press(now);
        match action {
            ClearAction::DeleteOne => self.delete_one(),
            ClearAction::ClearAll => self.clear_all(),
        }
        action
    }

    pub fn delete_one(&mut self) {
        // an empty field leaves the output alone
        if self.editor.is_empty() {
            return;
        }
        self.editor.delete_one_before_cursor();
        self.after_edit();
    }

    pub fn clear_all(&mut self) {
        self.editor.clear_all();
        self.after_edit();
    }

    pub fn move_left(&mut self) {
        self.editor.move_left();
    }

    pub fn move_right(&mut self) {
        self.editor.move_right();
    }

    pub fn move_home(&mut self) {
        self.editor.move_home();
    }

    pub fn move_end(&mut self) {
        self.editor.move_end();
    }

    /// Validate the field, then show one derivative per variable or the error flash.
    pub fn submit(&mut self, now: Instant) -> SessionState {
        let text = self.editor.text().to_string();
        match self.compute(&text) {
            Ok(derivatives) => {
                self.presenter.render(&derivatives);
                self.state = if derivatives.is_empty() {
                    SessionState::NoVariableMessage
                } else {
                    SessionState::ResultsShown
                };
            }
            Err(error) => {
                warn!("{:?}: {}", text, error);
                self.presenter.render_error(now);
                self.state = SessionState::ErrorFlash;
            }
        }
        self.state
    }

    fn compute(&self, text: &str) -> Result<DerivativeMap, InvalidExpression> {
        validate(&self.engine, text)?;
        let variables = extract_variables(text);
        info!(
            "differentiating {:?} with respect to {} variable(s)",
            text,
            variables.len()
        );
        compute_all(&self.engine, text, &variables)
    }

    /// Advance time: ends the error flash once its duration has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.presenter.poll(now) && self.state == SessionState::ErrorFlash {
            self.state = SessionState::Idle;
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn buffer(&self) -> &str {
        self.editor.text()
    }

    pub fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    pub fn display_with_cursor(&self) -> String {
        self.editor.display_with_cursor()
    }

    pub fn output(&self) -> &[String] {
        self.presenter.output()
    }

    pub fn region_state(&self, region: Region) -> RegionState {
        self.presenter.region_state(region)
    }

    /// True while an error flash is pending its revert.
    pub fn is_flashing(&self) -> bool {
        self.presenter.is_flashing()
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}
