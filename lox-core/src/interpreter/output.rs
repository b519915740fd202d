use std::sync::{Arc, RwLock};

/// Where `print` sends its lines. The interpreter never talks to stdout
/// directly, which keeps program output separate from diagnostics and
/// lets tests capture it.
pub trait OutputEmitterIO {
    fn emit_line(&self, line: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct StdoutEmitterIO;

impl OutputEmitterIO for StdoutEmitterIO {
    fn emit_line(&self, line: &str) {
        println!("{line}");
    }
}

#[derive(Debug, Default, Clone)]
pub struct VectorOutputEmitterIO {
    pub lines: Arc<RwLock<Vec<String>>>
}

impl VectorOutputEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<String> {
        let mut lines = self.write_lock();
        std::mem::take(&mut *lines)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<String>> {
        self.lines.write().expect("Output lock poisoned")
    }
}

impl OutputEmitterIO for VectorOutputEmitterIO {
    fn emit_line(&self, line: &str) {
        let mut lines = self.write_lock();

        lines.push(line.to_string());
    }
}
