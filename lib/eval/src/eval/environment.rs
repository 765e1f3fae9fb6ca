use std::collections::HashMap;

/// Name → value bindings for one session. Entries are only ever created
/// or overwritten by a successful assignment and are never deleted;
/// looking up an unbound name is the caller's error to report, not a
/// default of zero.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, f64>,
}

impl Environment {
    pub fn define(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut env = Environment::default();
        assert!(env.is_empty());
        assert_eq!(env.get("a"), None);

        env.define("a", 1.0);
        assert_eq!(env.get("a"), Some(1.0));
        assert_eq!(env.get("A"), None); // names are case-sensitive

        env.define("a", 2.5);
        assert_eq!(env.get("a"), Some(2.5));
        assert_eq!(env.len(), 1);
    }
}
