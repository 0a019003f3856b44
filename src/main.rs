use dotenvy::dotenv;
use rental_orders::{run, AppConfig};
use std::process;

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let result = AppConfig::from_env().and_then(|config| {
        log::info!("Submitting rental order from {}", config.script_path.display());
        run(&config)
    });

    match result {
        Ok(order_id) => log::info!("Created rental order {}", order_id),
        Err(e) => {
            log::error!("{}", e);
            process::exit(e.exit_code());
        }
    }
}
