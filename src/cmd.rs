use std::collections::HashMap;

use crate::option::Value;

/// The `CommandLine` holds the result of one successful parse.
///
/// Every name of every option given on the command line maps to that
/// option's value, so aliases resolve to the same value. Options that were
/// not given are absent; in particular a boolean option that was not given
/// is never reported as `false`.
///
/// The non-option arguments are the tokens from the first non-option token
/// onwards, in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    values: HashMap<String, Value>,
    non_options: Vec<String>,
}

impl CommandLine {
    pub(crate) fn new(values: HashMap<String, Value>, non_options: Vec<String>) -> CommandLine {
        CommandLine { values, non_options }
    }

    /// Get the non-option arguments.
    pub fn get_arg_list(&self) -> Vec<&str> {
        self.non_options.iter().map(|a| a.as_str()).collect()
    }

    /// Get the full `name => value` mapping.
    pub fn get_values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    pub fn into_values(self) -> HashMap<String, Value> {
        self.values
    }

    /// Check if the option named `opt` was given.
    pub fn has_option(&self, opt: &str) -> bool {
        self.values.contains_key(opt)
    }

    pub fn get_value(&self, opt: &str) -> Option<&Value> {
        self.values.get(opt)
    }

    /// `true` if the boolean option `opt` was given, `false` otherwise.
    pub fn get_flag(&self, opt: &str) -> bool {
        self.get_value(opt).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_int(&self, opt: &str) -> Option<i64> {
        self.get_value(opt).and_then(Value::as_int)
    }

    pub fn get_str(&self, opt: &str) -> Option<&str> {
        self.get_value(opt).and_then(Value::as_str)
    }

    /// Render the mapping as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.values)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::cmd::CommandLine;
    use crate::option::Value;

    fn sample() -> CommandLine {
        let mut values = HashMap::new();
        values.insert("v".to_string(), Value::Bool(true));
        values.insert("verbose".to_string(), Value::Bool(true));
        values.insert("l".to_string(), Value::Int(3));
        values.insert("f".to_string(), Value::Str("json".to_string()));
        CommandLine::new(values, vec!["in.txt".to_string(), "out.txt".to_string()])
    }

    #[test]
    fn test_typed_getters() {
        let cmd = sample();
        assert!(cmd.has_option("verbose"));
        assert!(!cmd.has_option("q"));
        assert!(cmd.get_flag("v"));
        assert!(!cmd.get_flag("q"));
        assert!(!cmd.get_flag("l"));
        assert_eq!(Some(3), cmd.get_int("l"));
        assert_eq!(None, cmd.get_int("f"));
        assert_eq!(Some("json"), cmd.get_str("f"));
        assert_eq!(vec!["in.txt", "out.txt"], cmd.get_arg_list());
    }

    #[test]
    fn test_to_json() {
        let mut values = HashMap::new();
        values.insert("l".to_string(), Value::Int(3));
        let cmd = CommandLine::new(values, vec![]);
        assert_eq!(r#"{"l":3}"#, cmd.to_json().unwrap());
    }
}
