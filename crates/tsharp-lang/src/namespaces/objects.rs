//! Game-object verbs over the run's object table.

use crate::error::{Arity, RunError};
use crate::Value;
use super::{Export, NamespaceInfo, NamespaceProvider, RuntimeState, as_handle, as_number, as_str, f};

pub struct ObjectsNamespace;

impl NamespaceInfo for ObjectsNamespace {
    fn name(&self) -> &'static str { "objects" }

    fn exports(&self) -> Vec<Export> {
        vec![
            f("spawn",   Arity::Exact(1)),
            f("move",    Arity::Exact(4)),
            f("rotate",  Arity::Exact(4)),
            f("destroy", Arity::Exact(1)),
            f("isAlive", Arity::Exact(1)),
        ]
    }
}

impl NamespaceProvider for ObjectsNamespace {
    fn call(
        &self,
        name: &str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<Option<Value>, RunError> {
        let v = match name {
            "spawn" => {
                let kind = as_str(&args[0], name, line)?;
                Value::Object(state.objects.spawn(kind))
            }
            "move" | "rotate" => {
                let id = as_handle(&args[0], name, line)?;
                let triple = [
                    as_number(&args[1], name, line)?,
                    as_number(&args[2], name, line)?,
                    as_number(&args[3], name, line)?,
                ];
                let result = if name == "move" {
                    state.objects.set_position(id, triple)
                } else {
                    state.objects.set_rotation(id, triple)
                };
                result.map_err(|kind| RunError::new(line, kind))?;
                Value::Null
            }
            "destroy" => {
                let id = as_handle(&args[0], name, line)?;
                state.objects.destroy(id).map_err(|kind| RunError::new(line, kind))?;
                Value::Null
            }
            "isAlive" => {
                let id = as_handle(&args[0], name, line)?;
                Value::Bool(state.objects.is_alive(id))
            }
            _ => return Ok(None),
        };
        Ok(Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::call_with;
    use super::*;

    fn spawn(state: &mut RuntimeState, kind: &str) -> Value {
        call_with(state, "spawn", &[Value::Str(kind.into())]).unwrap()
    }

    #[test]
    fn spawn_returns_handles() {
        let mut state = RuntimeState::default();
        assert!(matches!(spawn(&mut state, "cube"), Value::Object(1)));
        assert!(matches!(spawn(&mut state, "cube"), Value::Object(2)));
        assert!(state.output.is_empty());
    }

    #[test]
    fn move_updates_position() {
        let mut state = RuntimeState::default();
        let h = spawn(&mut state, "cube");
        let args = [h, Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)];
        call_with(&mut state, "move", &args).unwrap();
        assert_eq!(state.objects.snapshot()[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn destroyed_handle_fails() {
        let mut state = RuntimeState::default();
        let h = spawn(&mut state, "cube");
        call_with(&mut state, "destroy", &[h.clone()]).unwrap();
        assert!(matches!(call_with(&mut state, "isAlive", &[h.clone()]), Ok(Value::Bool(false))));
        let args = [h, Value::Number(0.0), Value::Number(0.0), Value::Number(0.0)];
        let err = call_with(&mut state, "rotate", &args).unwrap_err();
        assert_eq!(err.name(), "UnknownOrDeadObject");
    }

    #[test]
    fn number_is_not_a_handle() {
        let mut state = RuntimeState::default();
        spawn(&mut state, "cube");
        let err = call_with(&mut state, "destroy", &[Value::Number(1.0)]).unwrap_err();
        assert_eq!(err.name(), "TypeMismatch");
    }

    #[test]
    fn spawn_needs_string_kind() {
        let mut state = RuntimeState::default();
        let err = call_with(&mut state, "spawn", &[Value::Number(3.0)]).unwrap_err();
        assert_eq!(err.name(), "TypeMismatch");
    }
}
