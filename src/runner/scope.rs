use std::collections::HashMap;

use crate::{
    ast::statements::FnDeclStmt,
    errors::errors::{Error, ErrorImpl},
    object::object::Object,
    Position,
};

use super::builtins::is_builtin;

/// One activation: the program, a function call, or a nested block.
pub struct Scope<'a> {
    variables: HashMap<String, Object>,
    functions: HashMap<String, &'a FnDeclStmt>,
    /// Index of the enclosing frame in the `ScopeStack`; `None` for the program frame
    parent: Option<usize>,
    pub return_flag: bool,
    pub break_flag: bool,
    pub return_value: Option<Object>,
    /// Program and function-body frames may hold function definitions
    can_nest_functions: bool,
}

impl<'a> Scope<'a> {
    pub fn new(parent: Option<usize>, can_nest_functions: bool) -> Self {
        Scope {
            variables: HashMap::new(),
            functions: HashMap::new(),
            parent,
            return_flag: false,
            break_flag: false,
            return_value: None,
            can_nest_functions,
        }
    }

    pub fn get_variable(&self, name: &str) -> Option<&Object> {
        self.variables.get(name)
    }

    pub fn get_function(&self, name: &str) -> Option<&'a FnDeclStmt> {
        self.functions.get(name).copied()
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn can_nest_functions(&self) -> bool {
        self.can_nest_functions
    }
}

/// Frames of the running program, innermost last.
///
/// Each frame links to its parent by index. A frame is only popped after
/// every frame above it, so the indices stay valid while a frame lives.
pub struct ScopeStack<'a> {
    frames: Vec<Scope<'a>>,
}

impl<'a> Default for ScopeStack<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScopeStack<'a> {
    /// A stack holding only the program frame.
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![Scope::new(None, true)],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pushes a child of the current frame.
    pub fn push(&mut self, can_nest_functions: bool) {
        let parent = self.frames.len() - 1;
        self.frames.push(Scope::new(Some(parent), can_nest_functions));
    }

    /// Pops the current frame. The program frame is never popped.
    pub fn pop(&mut self) -> Scope<'a> {
        if self.frames.len() > 1 {
            if let Some(frame) = self.frames.pop() {
                return frame;
            }
        }
        Scope::new(None, true)
    }

    pub fn current(&self) -> &Scope<'a> {
        &self.frames[self.frames.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Scope<'a> {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Indices of the current frame and its ancestors, nearest first.
    fn chain(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.frames.len() - 1), |index| self.frames[*index].parent)
    }

    pub fn get_variable(&self, name: &str) -> Option<&Object> {
        self.chain()
            .find_map(|index| self.frames[index].get_variable(name))
    }

    /// Updates the nearest frame holding `name`, otherwise declares it in the current frame.
    pub fn assign_variable(&mut self, name: &str, value: Object) {
        let holder = self
            .chain()
            .find(|index| self.frames[*index].variables.contains_key(name))
            .unwrap_or(self.frames.len() - 1);

        self.frames[holder].variables.insert(name.to_string(), value);
    }

    /// Declares `name` in the current frame only; a second declaration is an error.
    pub fn declare_variable(&mut self, name: &str, value: Object, position: Position) -> Result<(), Error> {
        let frame = self.current_mut();
        if frame.variables.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.to_string(),
                },
                position,
            ));
        }

        frame.variables.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get_function(&self, name: &str) -> Option<&'a FnDeclStmt> {
        self.chain()
            .find_map(|index| self.frames[index].get_function(name))
    }

    /// Registers `function` in the current frame.
    pub fn declare_function(&mut self, function: &'a FnDeclStmt) -> Result<(), Error> {
        let position = function.span.start.clone();
        let frame = self.current_mut();

        if !frame.can_nest_functions {
            return Err(Error::new(
                ErrorImpl::NestedFunctionNotAllowed {
                    function: function.name.clone(),
                },
                position,
            ));
        }

        if is_builtin(&function.name) || frame.functions.contains_key(&function.name) {
            return Err(Error::new(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: function.name.clone(),
                },
                position,
            ));
        }

        frame.functions.insert(function.name.clone(), function);
        Ok(())
    }
}
