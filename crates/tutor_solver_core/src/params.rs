//! Typed access to loose parameter payloads.
//!
//! Every field has a primary name and at most one legacy alias. When both are
//! present with different values, [`AliasPolicy`] decides the outcome.

use crate::error::SolveError;
use num_rational::BigRational;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tutor_formatter::parse_rational;
use tutor_math::numeric::int;
use tutor_math::Relation;

/// Largest decimal exponent accepted in `1e20`-style numbers.
const MAX_DECIMAL_EXPONENT: u32 = 400;

/// Exact value of number text, including exponent notation (`1e20`,
/// `2.5E-3`).
fn number_text_rational(text: &str) -> Option<BigRational> {
    if let Some(value) = parse_rational(text) {
        return Some(value);
    }
    let (mantissa, exponent) = text.split_once(['e', 'E'])?;
    let mantissa = parse_rational(mantissa)?;
    let exponent: i32 = exponent.strip_prefix('+').unwrap_or(exponent).parse().ok()?;
    if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT {
        return None;
    }
    let scale = num_traits::pow(int(10), exponent.unsigned_abs() as usize);
    Some(if exponent < 0 { mantissa / scale } else { mantissa * scale })
}

/// Exact value of a JSON number or numeric string.
fn value_rational(value: &Value) -> Option<BigRational> {
    match value {
        Value::Number(n) => number_text_rational(&n.to_string()),
        Value::String(s) => number_text_rational(s),
        _ => None,
    }
}

/// Primary and alias values agree when they are equal, or name the same number.
fn equivalent(primary: &Value, alias: &Value) -> bool {
    primary == alias
        || matches!(
            (value_rational(primary), value_rational(alias)),
            (Some(p), Some(a)) if p == a
        )
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AliasPolicy {
    /// Primary name wins; the conflict is logged.
    #[default]
    PreferPrimary,
    /// Conflicting values are an `InvalidParameter` error.
    RejectConflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub primary: &'static str,
    pub alias: Option<&'static str>,
}

impl Field {
    pub const fn new(primary: &'static str, alias: Option<&'static str>) -> Self {
        Self { primary, alias }
    }
}

pub mod fields {
    use super::Field;

    pub const COEF_A: Field = Field::new("a", Some("coef_a"));
    pub const COEF_B: Field = Field::new("b", Some("coef_b"));
    pub const COEF_C: Field = Field::new("c", Some("coef_c"));
    pub const SLOPE_K: Field = Field::new("k", Some("coef_k"));
    pub const NUMERATOR_K: Field = Field::new("K", Some("k"));
    pub const ROOT_M: Field = Field::new("m", Some("root"));
    pub const SHIFT_P: Field = Field::new("p", Some("shift"));
    pub const SIGN: Field = Field::new("sign", Some("op"));
    pub const EXPRESSION: Field = Field::new("expression", None);
    pub const EXTRACT: Field = Field::new("extract", None);
    pub const GRAPHS: Field = Field::new("graphs", None);
    pub const OPTIONS: Field = Field::new("options", None);
    pub const CURVES: Field = Field::new("curves", None);
}

pub struct ParamReader<'a> {
    params: &'a Map<String, Value>,
    policy: AliasPolicy,
    /// Prefix for names in error messages, e.g. `curves.А.`
    scope: String,
}

impl<'a> ParamReader<'a> {
    pub fn new(params: &'a Map<String, Value>, policy: AliasPolicy) -> Self {
        Self {
            params,
            policy,
            scope: String::new(),
        }
    }

    fn scoped(&self, name: &str) -> String {
        format!("{}{}", self.scope, name)
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.params.get(name).filter(|v| !v.is_null())
    }

    /// Raw value under the primary name or its alias.
    pub fn raw(&self, field: Field) -> Result<Option<&'a Value>, SolveError> {
        let primary = self.present(field.primary);
        let alias = field.alias.and_then(|name| self.present(name));

        match (primary, alias) {
            (Some(p), Some(a)) if !equivalent(p, a) => match self.policy {
                AliasPolicy::PreferPrimary => {
                    tracing::warn!(
                        target: "params",
                        field = %self.scoped(field.primary),
                        alias = field.alias.unwrap_or_default(),
                        "alias_conflict_primary_wins"
                    );
                    Ok(Some(p))
                }
                AliasPolicy::RejectConflict => Err(SolveError::invalid(
                    self.scoped(field.primary),
                    format!(
                        "значения '{}' и '{}' противоречат друг другу",
                        field.primary,
                        field.alias.unwrap_or_default()
                    ),
                )),
            },
            (Some(p), _) => Ok(Some(p)),
            (None, Some(a)) => {
                tracing::trace!(
                    target: "params",
                    field = %self.scoped(field.primary),
                    "read_from_alias"
                );
                Ok(Some(a))
            }
            (None, None) => Ok(None),
        }
    }

    pub fn has(&self, field: Field) -> bool {
        self.present(field.primary).is_some()
            || field.alias.and_then(|name| self.present(name)).is_some()
    }

    pub fn rational(&self, field: Field) -> Result<Option<BigRational>, SolveError> {
        let Some(value) = self.raw(field)? else {
            return Ok(None);
        };
        let text = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => {
                return Err(SolveError::invalid(
                    self.scoped(field.primary),
                    format!("ожидалось число, получено {}", other),
                ))
            }
        };
        number_text_rational(&text).map(Some).ok_or_else(|| {
            SolveError::invalid(
                self.scoped(field.primary),
                format!("'{}' не является точным числом", text),
            )
        })
    }

    pub fn require_rational(&self, field: Field) -> Result<BigRational, SolveError> {
        self.rational(field)?
            .ok_or_else(|| SolveError::missing(self.scoped(field.primary)))
    }

    pub fn string(&self, field: Field) -> Result<Option<&'a str>, SolveError> {
        match self.raw(field)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(SolveError::invalid(
                self.scoped(field.primary),
                format!("ожидалась строка, получено {}", other),
            )),
        }
    }

    pub fn relation(&self, field: Field) -> Result<Relation, SolveError> {
        let text = self
            .string(field)?
            .ok_or_else(|| SolveError::missing(self.scoped(field.primary)))?;
        Relation::parse(text).ok_or_else(|| {
            SolveError::invalid(
                self.scoped(field.primary),
                format!("неподдерживаемый знак сравнения '{}'", text),
            )
        })
    }

    pub fn object(&self, field: Field) -> Result<Option<&'a Map<String, Value>>, SolveError> {
        match self.raw(field)? {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(SolveError::invalid(
                self.scoped(field.primary),
                format!("ожидался объект, получено {}", other),
            )),
        }
    }

    /// Reader over a nested object; error names are prefixed with `scope`.
    pub fn nested(&self, map: &'a Map<String, Value>, scope: &str) -> ParamReader<'a> {
        ParamReader {
            params: map,
            policy: self.policy,
            scope: format!("{}{}.", self.scope, scope),
        }
    }

    pub fn deserialize<T: DeserializeOwned>(&self, field: Field) -> Result<Option<T>, SolveError> {
        match self.raw(field)? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| SolveError::invalid(self.scoped(field.primary), e.to_string())),
        }
    }
}
