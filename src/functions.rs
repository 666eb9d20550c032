use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;

type Body = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// A callable with a fixed number of required arguments. The body always
/// receives exactly `arity` values.
#[derive(Clone)]
pub struct Function {
    pub arity: usize,
    body: Arc<Body>,
}

impl Function {
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            arity,
            body: Arc::new(body),
        }
    }

    pub fn call(&self, args: &[f64]) -> f64 {
        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("arity", &self.arity)
            .finish()
    }
}

/// Name to function mapping consulted by the evaluator.
#[derive(Debug, Clone)]
pub struct Functions {
    functions: HashMap<String, Function>,
}

impl std::default::Default for Functions {
    fn default() -> Self {
        let mut functions = Self::empty();
        functions.register("abs", 1, |args| args[0].abs());
        functions.register("sin", 1, |args| args[0].sin());
        functions.register("cos", 1, |args| args[0].cos());
        functions.register("pow", 2, |args| args[0].powf(args[1]));
        functions
    }
}

impl Functions {
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// adds `name`, replacing any function already registered under it
    pub fn register<F>(&mut self, name: &str, arity: usize, body: F) -> &mut Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.functions
            .insert(name.to_string(), Function::new(arity, body));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

lazy_static! {
    /// abs/1, sin/1, cos/1 and pow/2
    pub static ref BUILTINS: Functions = Functions::default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins() {
        let mut names: Vec<_> = BUILTINS.names().collect();
        names.sort();
        assert_eq!(names, vec!["abs", "cos", "pow", "sin"]);

        assert_eq!(BUILTINS.get("abs").unwrap().arity, 1);
        assert_eq!(BUILTINS.get("pow").unwrap().arity, 2);
        assert_eq!(BUILTINS.get("abs").unwrap().call(&[-1.5]), 1.5);
        assert_eq!(BUILTINS.get("pow").unwrap().call(&[2.0, 10.0]), 1024.0);
        assert_eq!(BUILTINS.get("cos").unwrap().call(&[0.0]), 1.0);
        assert!(BUILTINS.get("tan").is_none());
    }

    #[test]
    fn register_adds_and_replaces() {
        let mut functions = Functions::default();
        functions
            .register("max", 2, |args| args[0].max(args[1]))
            .register("abs", 1, |_| -1.0);

        assert_eq!(functions.get("max").unwrap().call(&[3.0, 7.0]), 7.0);
        assert_eq!(functions.get("abs").unwrap().call(&[5.0]), -1.0);
        assert_eq!(BUILTINS.get("abs").unwrap().call(&[-5.0]), 5.0);
    }

    #[test]
    fn closures_capture() {
        let scale = 2.5;
        let mut functions = Functions::empty();
        functions.register("scale", 1, move |args| args[0] * scale);
        assert_eq!(functions.get("scale").unwrap().call(&[4.0]), 10.0);
        assert!(functions.get("sin").is_none());
    }
}
