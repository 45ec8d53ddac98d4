use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

static DEBUG_FILE: Mutex<Option<File>> = Mutex::new(None);

pub fn init_debug_log(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    if let Ok(mut guard) = DEBUG_FILE.lock() {
        *guard = Some(file);
    }
    Ok(())
}

pub fn close_debug_log() {
    if let Ok(mut guard) = DEBUG_FILE.lock() {
        *guard = None;
    }
}

pub fn debug_log(msg: &str) {
    if let Ok(mut guard) = DEBUG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                msg
            );
            let _ = file.flush();
        }
    }
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::debug_logger::debug_log(&format!($($arg)*))
    };
}
