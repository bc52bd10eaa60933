use log::LevelFilter;

pub struct Logger;

impl Logger {
    pub fn init(level: LevelFilter) {
        let mut builder: env_logger::Builder = colog::default_builder();
        builder.filter_level(level);

        // Keep reqwest/hyper chatter out unless explicitly tracing.
        if level < LevelFilter::Trace {
            builder.filter_module("hyper_util", LevelFilter::Warn);
            builder.filter_module("reqwest", LevelFilter::Warn);
        }

        builder.init();
    }
}
