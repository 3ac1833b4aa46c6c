//! Configuration schema validation for pluggable implementations.
//!
//! Every collaborator implementation (order providers, oracles, samplers)
//! describes the TOML keys it accepts with a [`Schema`]. The config loader
//! runs these schemas before any factory is invoked.

use std::fmt;
use thiserror::Error;

/// Why a configuration table was rejected.
#[derive(Debug, Error)]
pub enum ValidationError {
	#[error("Missing required field: {0}")]
	MissingField(String),
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Accepted shape of a configuration value.
#[derive(Debug)]
pub enum FieldType {
	String,
	/// An integer within optional inclusive bounds.
	Integer { min: Option<i64>, max: Option<i64> },
	/// A string restricted to a fixed set of values.
	OneOf(&'static [&'static str]),
}

/// Extra check run on a value after its type is accepted.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A named configuration key.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Field({}: {:?}", self.name, self.field_type)?;
		if self.validator.is_some() {
			write!(f, ", checked")?;
		}
		write!(f, ")")
	}
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator run after the type check passes.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	fn check(&self, value: &toml::Value) -> Result<(), ValidationError> {
		check_type(&self.name, value, &self.field_type)?;
		if let Some(validator) = &self.validator {
			validator(value).map_err(|message| ValidationError::InvalidValue {
				field: self.name.clone(),
				message,
			})?;
		}
		Ok(())
	}
}

/// The keys an implementation requires and the keys it optionally reads.
#[derive(Debug, Default)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML table against this schema.
	///
	/// Keys not named by the schema are ignored, so shared keys such as
	/// `implementation` can live next to implementation-specific ones.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let Some(table) = config.as_table() else {
			return Err(ValidationError::TypeMismatch {
				field: "<root>".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			});
		};

		for field in &self.required {
			match table.get(&field.name) {
				Some(value) => field.check(value)?,
				None => return Err(ValidationError::MissingField(field.name.clone())),
			}
		}
		self.optional
			.iter()
			.filter_map(|field| table.get(&field.name).map(|value| (field, value)))
			.try_for_each(|(field, value)| field.check(value))?;

		Ok(())
	}
}

fn check_type(field: &str, value: &toml::Value, field_type: &FieldType) -> Result<(), ValidationError> {
	let invalid = |message: String| ValidationError::InvalidValue {
		field: field.to_string(),
		message,
	};
	let mismatch = |expected: &str| ValidationError::TypeMismatch {
		field: field.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	};

	match field_type {
		FieldType::String => {
			value.as_str().ok_or_else(|| mismatch("string"))?;
		}
		FieldType::Integer { min, max } => {
			let n = value.as_integer().ok_or_else(|| mismatch("integer"))?;
			match (min, max) {
				(Some(min), _) if n < *min => {
					return Err(invalid(format!("{} is below the minimum of {}", n, min)))
				}
				(_, Some(max)) if n > *max => {
					return Err(invalid(format!("{} is above the maximum of {}", n, max)))
				}
				_ => {}
			}
		}
		FieldType::OneOf(allowed) => {
			let s = value.as_str().ok_or_else(|| mismatch("string"))?;
			if !allowed.contains(&s) {
				return Err(invalid(format!("'{}' is not one of {:?}", s, allowed)));
			}
		}
	}

	Ok(())
}

/// Anything that can check an implementation's TOML parameters.
pub trait ConfigSchema: Send + Sync {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

impl ConfigSchema for Schema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::validate(self, config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(contents: &str) -> toml::Value {
		toml::Value::Table(toml::from_str::<toml::Table>(contents).unwrap())
	}

	fn schema() -> Schema {
		Schema::new(
			vec![Field::new(
				"gwei",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
			vec![
				Field::new("kind", FieldType::OneOf(&["fast", "standard"])),
				Field::new("url", FieldType::String).with_validator(|v| {
					match v.as_str() {
						Some(s) if s.starts_with("http") => Ok(()),
						_ => Err("must be an http url".to_string()),
					}
				}),
			],
		)
	}

	#[test]
	fn test_valid_config() {
		let config = parse("gwei = 40\nkind = \"fast\"");
		assert!(schema().validate(&config).is_ok());
	}

	#[test]
	fn test_missing_required_field() {
		let config = parse("kind = \"fast\"");
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::MissingField(f)) if f == "gwei"
		));
	}

	#[test]
	fn test_integer_bounds_and_enums() {
		let config = parse("gwei = 0");
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::InvalidValue { .. })
		));

		let config = parse("gwei = 5\nkind = \"slow\"");
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::InvalidValue { .. })
		));
	}

	#[test]
	fn test_custom_validator() {
		let config = parse("gwei = 5\nurl = \"ftp://x\"");
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "url"
		));
	}
}
