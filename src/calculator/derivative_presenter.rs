//! Computes one partial derivative per variable and keeps what the output area shows.
//!
//! The presenter also owns the error animation of the four display regions.
//! An invalid expression sets all of them to `RegionState::Error`, and the
//! next `poll` after the flash duration sets them back to `Normal`.
use std::time::Instant;

use log::info;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::calculator::error_flash::ErrorFlash;
use crate::calculator::expression_analyzer::VariableSet;
use crate::symbolic::symbolic_errors::InvalidExpression;
use crate::symbolic::symbolic_traits::SymbolicEngine;
use crate::Utils::config::CalculatorConfig;

/// Variable and derivative text, in the order of the variable set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivativeMap(Vec<(String, String)>);

impl DerivativeMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, variable: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(v, _)| v == variable)
            .map(|(_, d)| d.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(v, d)| (v.as_str(), d.as_str()))
    }
}

/// One `engine.derivative` call per variable. Nothing is cached between calls.
pub fn compute_all<E: SymbolicEngine + ?Sized>(
    engine: &E,
    text: &str,
    variables: &VariableSet,
) -> Result<DerivativeMap, InvalidExpression> {
    let mut entries = Vec::with_capacity(variables.len());
    for variable in variables.iter() {
        let derivative = engine.derivative(text, variable)?;
        entries.push((variable.clone(), derivative.to_string()));
    }
    Ok(DerivativeMap(entries))
}

/// `∂/∂x: 2 * x`
pub fn format_line(variable: &str, derivative: &str) -> String {
    format!("∂/∂{}: {}", variable, derivative)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum Region {
    #[strum(serialize = "output")]
    Output,
    #[strum(serialize = "input")]
    Input,
    #[strum(serialize = "submit")]
    Submit,
    #[strum(serialize = "indicator")]
    Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Normal,
    Error,
}

#[derive(Debug, Clone)]
pub struct DerivativePresenter {
    output: Vec<String>,
    regions: [RegionState; 4],
    flash: ErrorFlash,
    no_variable_message: String,
    invalid_expression_message: String,
}

impl Default for DerivativePresenter {
    fn default() -> Self {
        DerivativePresenter::new(&CalculatorConfig::default())
    }
}

impl DerivativePresenter {
    pub fn new(config: &CalculatorConfig) -> Self {
        DerivativePresenter {
            output: Vec::new(),
            regions: [RegionState::Normal; 4],
            flash: ErrorFlash::new(config.error_flash),
            no_variable_message: config.no_variable_message.clone(),
            invalid_expression_message: config.invalid_expression_message.clone(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn region_state(&self, region: Region) -> RegionState {
        self.regions[region as usize]
    }

    /// The regions show the error and their revert is still pending.
    pub fn is_flashing(&self) -> bool {
        self.flash.is_active()
    }

    /// Replace the output with one line per entry, or the no-variable message.
    pub fn render(&mut self, derivatives: &DerivativeMap) {
        self.output.clear();
        if derivatives.is_empty() {
            self.output.push(self.no_variable_message.clone());
            return;
        }
        for (variable, derivative) in derivatives.iter() {
            let line = format_line(variable, derivative);
            info!("{}", line);
            self.output.push(line);
        }
    }

    /// Show the invalid-expression message and start the error animation.
    /// A flash that is already running is restarted from `now`.
    pub fn render_error(&mut self, now: Instant) {
        for region in Region::iter() {
            self.regions[region as usize] = RegionState::Error;
        }
        self.output = vec![self.invalid_expression_message.clone()];
        self.flash.start(now);
    }

    /// Revert the regions once the flash deadline has passed. Returns true on the revert.
    ///
    /// The invalid-expression message stays in the output until the next edit.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.flash.poll(now) {
            return false;
        }
        self.regions = [RegionState::Normal; 4];
        true
    }

    pub fn clear(&mut self) {
        self.output.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::expression_analyzer::extract_variables;
    use crate::symbolic::symbolic_engine::Expr;
    use crate::symbolic::symbolic_traits::NativeEngine;
    use std::cell::RefCell;
    use std::time::Duration;

    /// Records every call and answers with a fixed tree.
    struct CountingEngine {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl SymbolicEngine for CountingEngine {
        fn parse(&self, _text: &str) -> Result<Expr, InvalidExpression> {
            Ok(Expr::Const(0.0))
        }

        fn derivative(&self, text: &str, variable: &str) -> Result<Expr, InvalidExpression> {
            self.calls
                .borrow_mut()
                .push((text.to_string(), variable.to_string()));
            Ok(Expr::Var(format!("d{}", variable)))
        }
    }

    #[test]
    fn test_compute_all_calls_engine_once_per_variable() {
        let engine = CountingEngine {
            calls: RefCell::new(Vec::new()),
        };
        let vars = extract_variables("x*y + y*z");
        let map = compute_all(&engine, "x*y + y*z", &vars).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(
            engine.calls.borrow().as_slice(),
            &[
                ("x*y + y*z".to_string(), "x".to_string()),
                ("x*y + y*z".to_string(), "y".to_string()),
                ("x*y + y*z".to_string(), "z".to_string()),
            ]
        );
        assert_eq!(map.get("z"), Some("dz"));

        // a second run asks the engine again
        compute_all(&engine, "x*y + y*z", &vars).unwrap();
        assert_eq!(engine.calls.borrow().len(), 6);
    }

    #[test]
    fn test_compute_all_with_native_engine() {
        let vars = extract_variables("x^2 + y");
        let map = compute_all(&NativeEngine, "x^2 + y", &vars).unwrap();
        let entries: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(entries, vec![("x", "2 * x"), ("y", "1")]);
    }

    #[test]
    fn test_render_one_line_per_variable() {
        let mut presenter = DerivativePresenter::default();
        presenter.render(&DerivativeMap(vec![("x".into(), "2 * x".into())]));
        presenter.render(&DerivativeMap(vec![
            ("x".into(), "2 * x".into()),
            ("y".into(), "1".into()),
        ]));
        assert_eq!(presenter.output(), &["∂/∂x: 2 * x", "∂/∂y: 1"]);
    }

    #[test]
    fn test_render_empty_map_shows_no_variable_message() {
        let mut presenter = DerivativePresenter::default();
        presenter.render(&DerivativeMap::default());
        assert_eq!(presenter.output(), &["No variable found"]);
    }

    #[test]
    fn test_render_error_then_revert_after_700_ms() {
        let t0 = Instant::now();
        let mut presenter = DerivativePresenter::default();
        presenter.render_error(t0);
        assert_eq!(presenter.output(), &["Invalid expression."]);
        for region in Region::iter() {
            assert_eq!(presenter.region_state(region), RegionState::Error);
        }
        assert!(!presenter.poll(t0 + Duration::from_millis(699)));
        assert!(presenter.is_flashing());
        assert!(presenter.poll(t0 + Duration::from_millis(700)));
        assert!(!presenter.is_flashing());
        for region in Region::iter() {
            assert_eq!(presenter.region_state(region), RegionState::Normal);
        }
        assert!(!presenter.poll(t0 + Duration::from_millis(1400)));
    }

    #[test]
    fn test_clear() {
        let mut presenter = DerivativePresenter::default();
        presenter.render(&DerivativeMap::default());
        presenter.clear();
        assert!(presenter.output().is_empty());
    }
}
