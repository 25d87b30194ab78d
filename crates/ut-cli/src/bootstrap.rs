use anyhow::Context;
use ut_config::UndertakerConfig;

/// Load configuration, reading `.env` from the working directory first.
pub fn load_config() -> anyhow::Result<UndertakerConfig> {
    UndertakerConfig::load_with_dotenv().context("failed to load undertaker configuration")
}
