// SPDX-License-Identifier: MPL-2.0
use lens_gallery::app::{self, parse_flags};
use lens_gallery::config::Config;
use lens_gallery::i18n::I18n;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match parse_flags(pico_args::Arguments::from_env()) {
        Ok(flags) => app::run(flags).await,
        Err(err) => {
            log::debug!("{err}");
            let i18n = I18n::new(None, &Config::default());
            let (key, args) = err.i18n();
            let args: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
            eprintln!("{}", i18n.tr_with_args(key, &args));
            eprintln!("{}", i18n.tr("cli-usage"));
            ExitCode::from(2)
        }
    }
}
