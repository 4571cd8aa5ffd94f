//! Terminal presentation adapter.
mod command;
mod render;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use log::LevelFilter;
use marquee_app::config::API_KEY_VAR;
use marquee_app::{AppConfig, Browser};
use marquee_engine::ReqwestCatalogClient;
use marquee_logging::{marquee_info, marquee_warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use command::Command;

enum Input {
    Line(Option<String>),
    Engine(bool),
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    marquee_logging::initialize(&config.log_destination, LevelFilter::Info);
    if config.catalog.api_key.is_none() {
        marquee_warn!("No catalog api key configured; set {}", API_KEY_VAR);
    }

    let client = ReqwestCatalogClient::new(config.catalog_settings())
        .context("building catalog client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    runtime.block_on(event_loop(Browser::new(Arc::new(client), config.debounce())))
}

async fn event_loop(mut browser: Browser) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", command::HELP);
    browser.mount();

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line.context("reading stdin")?),
            alive = browser.next_event() => Input::Engine(alive),
        };

        match input {
            Input::Line(None) | Input::Engine(false) => break,
            Input::Line(Some(line)) => match command::parse(&line) {
                Command::Input(text) => browser.input_changed(text),
                Command::Search(term) => browser.search(term),
                Command::LoadMore => browser.load_more(),
                Command::Retry => browser.retry(),
                Command::Help => println!("{}", command::HELP),
                Command::Quit => break,
            },
            Input::Engine(true) => {}
        }

        if browser.consume_dirty() {
            draw(&browser)?;
        }
    }

    browser.unmount();
    marquee_info!("Shutting down");
    Ok(())
}

fn draw(browser: &Browser) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out)?;
    for line in render::render(&browser.snapshot()) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
