use env_logger::fmt::{Color, Formatter};
use log::{Level, LevelFilter, Record};
use std::io::Write;

/// Installs the console logger.
///
/// `RUST_LOG` takes precedence. Without it this crate logs at debug level in
/// debug builds and at warn level in release builds; other crates are muted.
pub fn setup_logger() {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter(None, LevelFilter::Off);
        if cfg!(debug_assertions) {
            builder.filter(Some(env!("CARGO_CRATE_NAME")), LevelFilter::Debug);
        } else {
            builder.filter(Some(env!("CARGO_CRATE_NAME")), LevelFilter::Warn);
        }
    }

    builder.format(|buf: &mut Formatter, record: &Record| {
        let module_info = match (record.module_path(), record.line()) {
            (Some(module), Some(line)) => format!("{module}:{line}"),
            (Some(module), None) => module.to_string(),
            _ => "unknown".to_string(),
        };

        let timestamp = buf.timestamp_micros();

        let mut level_style = buf.style();
        match record.level() {
            Level::Error => level_style.set_color(Color::Red).set_bold(true),
            Level::Warn => level_style.set_color(Color::Yellow).set_bold(true),
            Level::Info => level_style.set_color(Color::Green).set_bold(true),
            Level::Debug => level_style.set_color(Color::Blue).set_bold(true),
            Level::Trace => level_style.set_color(Color::White),
        };
        let mut meta_style = buf.style();
        meta_style.set_color(Color::Rgb(120, 120, 120));

        writeln!(
            buf,
            "{} {} {} {}",
            meta_style.value(timestamp),
            level_style.value(record.level()),
            meta_style.value(module_info),
            record.args()
        )
    });

    builder.init();
}
