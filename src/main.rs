use log::debug;
use lunch_menus::{registry, MenuGatherer};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Optional argument: comma separated restaurant ids or titles
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--list") {
        for restaurant in registry() {
            println!(
                "{:<16} {:<16} {:<14} {}",
                restaurant.id,
                restaurant.title,
                restaurant.input_mode(),
                restaurant.url.as_deref().unwrap_or("-")
            );
        }
        return Ok(());
    }

    let allowed: Vec<String> = args
        .first()
        .map(|names| {
            names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    debug!("Restricting run to {:?}", allowed);

    let menus = MenuGatherer::builder().only(allowed).build()?.gather().await;
    println!("{}", serde_json::to_string_pretty(&menus)?);

    Ok(())
}
