use std::ffi::{CStr, CString};
use std::ptr;
use libc::c_char;
use crate::ast::Command;
use super::executor::ExecError;

/// Default cap on the number of tokens passed to `execvp`.
pub const MAX_ARGS: usize = 64;

/// NUL-terminated `argv` array ready for `execvp`.
///
/// The pointers reference the heap buffers of `args`, which never move
/// while the vector is alive.
#[derive(Debug)]
pub struct ArgVector {
    args: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl ArgVector {
    pub fn program(&self) -> &CStr {
        &self.args[0]
    }

    pub fn args(&self) -> &[CString] {
        &self.args
    }

    /// Pointer to the first entry; the array ends with a null pointer.
    pub fn as_ptr(&self) -> *const *const c_char {
        self.ptrs.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }
}

pub fn build_argv(command: &Command, max_args: usize) -> Result<ArgVector, ExecError> {
    if command.len() > max_args {
        return Err(ExecError::TooManyArguments {
            count: command.len(),
            max: max_args,
        });
    }

    let args = command
        .tokens()
        .iter()
        .map(|token| {
            CString::new(token.as_bytes()).map_err(|_| ExecError::InvalidArgument(token.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut ptrs: Vec<*const c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
    ptrs.push(ptr::null());

    Ok(ArgVector { args, ptrs })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(tokens: &[&str]) -> Command {
        Command::new(tokens.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_build_argv_is_null_terminated() {
        let argv = build_argv(&cmd(&["echo", "hi"]), MAX_ARGS).unwrap();
        assert_eq!(argv.len(), 2);
        assert_eq!(argv.program().to_str().unwrap(), "echo");

        let raw = unsafe { std::slice::from_raw_parts(argv.as_ptr(), 3) };
        assert_eq!(unsafe { CStr::from_ptr(raw[1]) }.to_str().unwrap(), "hi");
        assert!(raw[2].is_null());
    }

    #[test]
    fn test_max_args_is_inclusive() {
        let tokens: Vec<String> = (0..MAX_ARGS).map(|i| format!("a{}", i)).collect();
        let command = Command::new(tokens).unwrap();
        assert_eq!(build_argv(&command, MAX_ARGS).unwrap().len(), MAX_ARGS);
    }

    #[test]
    fn test_too_many_arguments() {
        let tokens: Vec<String> = (0..=MAX_ARGS).map(|i| format!("a{}", i)).collect();
        let command = Command::new(tokens).unwrap();
        match build_argv(&command, MAX_ARGS) {
            Err(ExecError::TooManyArguments { count, max }) => {
                assert_eq!(count, MAX_ARGS + 1);
                assert_eq!(max, MAX_ARGS);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_interior_nul_is_rejected() {
        let result = build_argv(&cmd(&["echo", "a\0b"]), MAX_ARGS);
        assert!(matches!(result, Err(ExecError::InvalidArgument(ref s)) if s == "a\0b"));
    }
}
