//! Laravel-compatible string casing and the names derived from one entity.
//!
//! Generated PHP refers to classes, tables and routes by these names, so the
//! casing rules follow Laravel's `Str` helpers rather than a generic
//! case-conversion library.

use crate::inflector;

/// Upper-case the first character (ASCII only, like PHP's `ucfirst`).
pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

pub fn lcfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Upper-case the first character of every whitespace-separated word.
pub fn ucwords(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C' | '\x0B');
    }
    result
}

/// `user_profile`, `user-profile` and `user profile` all become `UserProfile`.
pub fn studly(value: &str) -> String {
    value
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(ucfirst)
        .collect()
}

pub fn camel(value: &str) -> String {
    lcfirst(&studly(value))
}

pub fn snake(value: &str, delimiter: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_lowercase()) {
        return value.to_string();
    }

    let compact: String = ucwords(value).chars().filter(|c| !c.is_whitespace()).collect();

    let mut result = String::with_capacity(compact.len() + 4);
    for (i, c) in compact.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            result.push_str(delimiter);
        }
        result.push(c);
    }
    result.to_lowercase()
}

pub fn kebab(value: &str) -> String {
    snake(value, "-")
}

pub fn plural(value: &str) -> String {
    inflector::plural(value)
}

/// Pluralize only the last studly word: `UserProfile` -> `UserProfiles`.
pub fn plural_studly(value: &str) -> String {
    let split_at = value
        .char_indices()
        .filter(|(_, c)| c.is_ascii_uppercase())
        .map(|(i, _)| i)
        .filter(|i| *i > 0)
        .last()
        .unwrap_or(0);

    let (head, last) = value.split_at(split_at);
    format!("{}{}", head, plural(last))
}

/// Every name the generated files need, derived from one entity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Studly singular, e.g. `UserProfile`
    pub model: String,
    /// Camel singular, e.g. `userProfile`
    pub model_variable: String,
    /// Camel plural, e.g. `userProfiles`
    pub model_variable_plural: String,
    /// Snake plural table name, e.g. `user_profiles`
    pub table: String,
    /// Kebab plural route segment, e.g. `user-profiles`
    pub route: String,
}

impl EntityNames {
    pub fn new(entity: &str) -> Self {
        let model = studly(entity);
        let model_variable = camel(&model);
        Self {
            model_variable_plural: plural(&model_variable),
            table: snake(&plural_studly(&model), "_"),
            route: kebab(&plural(&model)),
            model_variable,
            model,
        }
    }

    pub fn service(&self) -> String {
        format!("{}Service", self.model)
    }

    pub fn interface(&self) -> String {
        format!("{}ServiceInterface", self.model)
    }

    pub fn service_variable(&self) -> String {
        format!("{}Service", self.model_variable)
    }

    pub fn controller(&self) -> String {
        format!("{}Controller", self.model)
    }

    pub fn request(&self) -> String {
        format!("{}Request", self.model)
    }

    pub fn resource(&self) -> String {
        format!("{}Resource", self.model)
    }

    pub fn test(&self) -> String {
        format!("{}Test", self.model)
    }

    /// Migration description passed to `make:migration`.
    pub fn migration(&self) -> String {
        format!("create_{}_table", self.table)
    }
}
