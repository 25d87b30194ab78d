use anyhow::Context;
use chrono::{Local, NaiveDate};
use ut_clients::{BugzillaClient, TicketQuery};
use ut_config::UndertakerConfig;

/// Authenticated tracker client. Fails with the credentials hint when no API
/// key is configured.
pub fn bugzilla_client(config: &UndertakerConfig) -> anyhow::Result<BugzillaClient> {
    let api_key = config.bugzilla.api_key()?;
    BugzillaClient::new(&config.bugzilla.url, api_key).context("failed to build bug tracker client")
}

/// Open tickets in the retirement component.
#[must_use]
pub fn open_retirement_query(config: &UndertakerConfig) -> TicketQuery {
    TicketQuery {
        product: config.bugzilla.product.clone(),
        component: config.bugzilla.component.clone(),
        statuses: config.bugzilla.open_statuses.clone(),
    }
}

/// Today's date on the local calendar, the date whiteboards are stamped
/// with and compared against.
#[must_use]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Full name of the invoking user: the first comma-separated field of their
/// account's GECOS entry, as resolved through the system user database.
pub fn invoking_user_name() -> Option<String> {
    let gecos = whoami::fallible::realname().ok()?;
    first_gecos_field(&gecos)
}

fn first_gecos_field(gecos: &str) -> Option<String> {
    gecos
        .split(',')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
