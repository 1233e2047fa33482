use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(tx: Sender<AppEvent>, config_override: Option<PathBuf>) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            tokio::spawn(async move {
                crate::config::run_async_watcher(tx, config_override).await;
            });

            std::future::pending::<()>().await;
        });
    });
}
