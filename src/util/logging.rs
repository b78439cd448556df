use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

static LOGGER_CONFIG: Lazy<RwLock<LoggingConfig>> =
    Lazy::new(|| RwLock::new(LoggingConfig::default()));

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub enum LogLevel {
    INFO,
    VERBOSE,
}

#[macro_export]
macro_rules! logln {
    ($fmt:literal) => {
        if $crate::logging::is_enabled(Self::CC) {
            println!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::logging::is_enabled(Self::CC) {
            print!("[{}:{}] ", file!(), line!());
            println!($fmt, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! logvbln {
    ($fmt:literal) => {
        if $crate::logging::is_enabled(Self::CC) && $crate::logging::is_at_level(Self::CC, $crate::logging::LogLevel::VERBOSE) {
            println!("[{}:{}] {}", file!(), line!(), $fmt);
        }
    };
    ($fmt:literal, $($arg:tt)*) => {
        if $crate::logging::is_enabled(Self::CC) && $crate::logging::is_at_level(Self::CC, $crate::logging::LogLevel::VERBOSE) {
            print!("[{}:{}] ", file!(), line!());
            println!($fmt, $($arg)*);
        }
    }
}

fn with_config<R>(f: impl FnOnce(&LoggingConfig) -> R) -> R {
    match LOGGER_CONFIG.read() {
        Ok(config) => f(&config),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

fn with_config_mut<R>(f: impl FnOnce(&mut LoggingConfig) -> R) -> R {
    match LOGGER_CONFIG.write() {
        Ok(mut config) => f(&mut config),
        Err(poisoned) => f(&mut poisoned.into_inner()),
    }
}

pub fn is_enabled(cc: &'static str) -> bool {
    with_config(|config| config.cc_enabled(cc))
}

pub fn is_at_level(cc: &'static str, level: LogLevel) -> bool {
    with_config(|config| config.cc_at_level(cc, level))
}

pub fn disable_named(cc: &str) {
    with_config_mut(|config| config.disable_named(cc));
}

pub fn set_global_logging(enabled: bool) {
    with_config_mut(|config| {
        if enabled {
            config.enable_global_tracing()
        } else {
            config.disable_global_tracing()
        }
    });
}

pub fn set_global_level(level: LogLevel) {
    with_config_mut(|config| config.set_global_level(level));
}

pub struct LoggingConfig {
    global_tracing_enabled: bool,
    global_level: LogLevel,
    flags: HashMap<&'static str, (bool, LogLevel)>, // <component, (enabled, level)>
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_tracing_enabled: true,
            global_level: LogLevel::INFO,
            flags: Default::default(),
        }
    }
}

impl LoggingConfig {
    pub fn cc_enabled(&self, cc: &str) -> bool {
        if !self.global_tracing_enabled {
            return false;
        }

        self.flags.get(cc).unwrap_or(&(true, LogLevel::INFO)).0
    }

    pub fn cc_at_level(&self, cc: &str, level: LogLevel) -> bool {
        if self.global_level >= level {
            return true;
        }

        self.flags.get(cc).unwrap_or(&(true, LogLevel::INFO)).1 >= level
    }

    pub fn enable_cc(&mut self, cc: &'static str, level: LogLevel) {
        self.flags.insert(cc, (true, level));
    }

    pub fn disable_cc(&mut self, cc: &'static str) {
        self.flags.insert(cc, (false, LogLevel::INFO));
    }

    /// Disables a component named at runtime. Each distinct name is leaked
    /// once and reused afterwards.
    pub fn disable_named(&mut self, cc: &str) {
        let key: &'static str = match self.flags.get_key_value(cc) {
            Some((&key, _)) => key,
            None => Box::leak(cc.to_owned().into_boxed_str()),
        };

        self.disable_cc(key);
    }

    pub fn enable_global_tracing(&mut self) {
        self.global_tracing_enabled = true;
    }

    pub fn disable_global_tracing(&mut self) {
        self.global_tracing_enabled = false;
    }

    pub fn set_global_level(&mut self, level: LogLevel) {
        self.global_level = level;
    }
}
