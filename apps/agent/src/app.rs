//! Application orchestrator: authenticates the plugin and drives its tick
//! loop until shutdown.

use std::sync::Arc;

use anyhow::bail;
use minegate_plugin::{AuthOutcome, Host, MinecraftPlugin};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::host::StandaloneHost;

/// Runs the agent until shutdown is requested.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let data_dir = config.data_dir();
    let host = Arc::new(StandaloneHost::open(&data_dir)?);
    tracing::info!(path = %data_dir.display(), "host state directory");

    let mut plugin = MinecraftPlugin::new(
        Arc::clone(&host) as Arc<dyn Host>,
        config.plugin_config(),
    );

    // -- Authentication --
    let stored = host.stored_credentials();
    if let AuthOutcome::NextStep(step) = plugin.authenticate(stored.as_ref()) {
        tracing::info!(title = %step.window_title, "answering configuration wizard from config");
        let end_uri = wizard_end_uri(&config)?;
        if let AuthOutcome::NextStep(step) = plugin.pass_login_credentials(&end_uri) {
            bail!("configuration rejected, wizard asked again: {}", step.start_uri);
        }
    }

    plugin.handshake_complete();
    for game in plugin.get_owned_games() {
        tracing::info!(game = %game.game_id, title = %game.game_title, "owned");
    }
    plugin.game_times_import_complete();

    tracing::info!("agent ready");

    // -- Main loop --
    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("shutdown signal received");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("SIGINT received, shutting down");
                cancel.cancel();
            }
            _ = ticker.tick() => {
                plugin.tick().await;
            }
        }
    }

    // -- Graceful shutdown --
    for game in plugin.owned().to_vec() {
        let time = plugin.get_game_time(game);
        tracing::info!(
            %game,
            minutes = time.time_played,
            last_played = ?time.last_played_time,
            "play time"
        );
    }
    plugin.shutdown();

    Ok(())
}

/// Builds the URI the wizard page would finish on for this configuration.
fn wizard_end_uri(config: &Config) -> anyhow::Result<String> {
    let mut url = reqwest::Url::parse("minegate://wizard/finished")?;
    {
        let mut query = url.query_pairs_mut();
        for game in &config.owned {
            query.append_pair(game.as_str(), "on");
        }
        if let Some(path) = &config.multimc_path {
            query.append_pair("path", path);
        }
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use minegate_plugin::Credentials;
    use minegate_protocol::GameId;

    use super::*;

    #[test]
    fn end_uri_carries_owned_and_path() {
        let config = Config {
            owned: vec![GameId::Minecraft, GameId::MinecraftDungeons],
            multimc_path: Some("C:\\Games\\MultiMC\\MultiMC.exe".into()),
            ..Config::default()
        };
        let uri = wizard_end_uri(&config).unwrap();
        assert!(uri.contains("finished"));

        let creds = Credentials::from_end_uri(&uri).unwrap();
        assert_eq!(creds.owned, config.owned);
        assert_eq!(creds.multimcpath, config.multimc_path);
    }

    #[test]
    fn end_uri_without_path() {
        let uri = wizard_end_uri(&Config::default()).unwrap();
        let creds = Credentials::from_end_uri(&uri).unwrap();
        assert_eq!(creds.owned, vec![GameId::Minecraft]);
        assert_eq!(creds.multimcpath, None);
    }
}
