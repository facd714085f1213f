//! Command handlers: wire settings, store, and derivations together.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};
use tracing::info;

use bitimaps_cli::config::Settings;
use bitimaps_core::{
    PublisherQuery, PublisherSortKey, SortConfig, SortDirection, TerritoryQuery, TerritorySortKey,
    dashboard, ongoing_assignments, publisher_details, territory_details_for, transition,
};
use bitimaps_model::{
    AssignRequest, CompleteRequest, NewPublisher, NewTerritory, PublisherPatch, StoreError,
    TerritoryPatch, TerritoryStatus,
};
use bitimaps_store::{DataStore, OfflineCache, RestStore, Session, Snapshot};

use crate::cli::{
    AssignArgs, CompleteArgs, LinkCommand, LoginArgs, PublisherCommand, PublisherSortArg,
    PublishersArgs, TerritoriesArgs, TerritoryCommand, TerritorySortArg,
};
use crate::summary;

/// Build the REST store from settings, attaching the offline cache when
/// enabled. Activation sweeps partitions left by older cache versions.
fn open_store(settings: &Settings) -> Result<RestStore> {
    if settings.connection.url.is_empty() || settings.connection.anon_key.is_empty() {
        bail!(
            "backend not configured; set [connection] url and anon_key in {}",
            Settings::config_path().display()
        );
    }
    let store = RestStore::new(&settings.connection.url, &settings.connection.anon_key)
        .map_err(|error| anyhow!("{}", error.user_message()))?;
    if settings.cache.enabled {
        let cache = OfflineCache::open_current(settings.cache_root())
            .context("failed to open offline cache")?;
        cache.activate().context("failed to sweep old caches")?;
        return Ok(store.with_cache(cache));
    }
    Ok(store)
}

fn require_login(settings: &Settings) -> Result<()> {
    if !settings.session.authenticated {
        bail!("not logged in; run `bitimaps login` first");
    }
    Ok(())
}

fn fetch_snapshot(store: &dyn DataStore) -> Result<Snapshot> {
    Snapshot::fetch(store).map_err(|error| anyhow!("{}", error.user_message()))
}

/// Every mutation is followed by a full re-fetch so the printed state is the
/// stored state, not the request.
fn print_fresh_territory(store: &dyn DataStore, id: i64) -> Result<()> {
    let snapshot = fetch_snapshot(store)?;
    match snapshot.territories.iter().find(|t| t.id == id) {
        Some(territory) => summary::print_territory_details(&territory_details_for(
            territory,
            &snapshot.publishers,
            &snapshot.assignments,
        )),
        None => summary::print_territories(&snapshot.territories),
    }
    Ok(())
}

fn print_fresh_publisher(store: &dyn DataStore, id: i64) -> Result<()> {
    let snapshot = fetch_snapshot(store)?;
    let details = publisher_details(
        &snapshot.publishers,
        &snapshot.territories,
        &snapshot.assignments,
    );
    match details.iter().find(|d| d.publisher.id == id) {
        Some(details) => summary::print_publisher_details(details),
        None => summary::print_publishers(&snapshot.publishers),
    }
    Ok(())
}

pub fn run_login(args: &LoginArgs) -> Result<()> {
    let mut settings = Settings::load();
    let store = open_store(&settings)?;
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password()?,
    };
    let mut session = Session::new();
    session
        .login(&store, &password)
        .map_err(|error| anyhow!("{}", error.user_message()))?;
    settings.session.authenticated = true;
    settings.save().map_err(|error| anyhow!(error))?;
    println!("Login berhasil.");
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let mut settings = Settings::load();
    settings.session.authenticated = false;
    settings.save().map_err(|error| anyhow!(error))?;
    println!("Logout berhasil.");
    Ok(())
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn run_dashboard() -> Result<()> {
    let settings = Settings::load();
    let store = open_store(&settings)?;
    let snapshot = fetch_snapshot(&store)?;
    let board = dashboard(
        &snapshot.territories,
        &snapshot.publishers,
        &snapshot.assignments,
    );
    summary::print_dashboard(&board);
    Ok(())
}

pub fn run_territories(args: &TerritoriesArgs) -> Result<()> {
    let settings = Settings::load();
    let store = open_store(&settings)?;
    let snapshot = fetch_snapshot(&store)?;
    let statuses = args
        .status
        .iter()
        .map(|value| value.parse::<TerritoryStatus>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| anyhow!(error))?;
    let query = TerritoryQuery {
        statuses,
        kdls: args.kdl.clone(),
        search: args.search.clone(),
        sort: SortConfig {
            key: match args.sort {
                TerritorySortArg::Name => TerritorySortKey::Name,
                TerritorySortArg::Status => TerritorySortKey::Status,
                TerritorySortArg::Kdl => TerritorySortKey::Kdl,
            },
            direction: if args.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        },
    };
    summary::print_territories(&query.apply(&snapshot.territories));
    Ok(())
}

pub fn run_publishers(args: &PublishersArgs) -> Result<()> {
    let settings = Settings::load();
    let store = open_store(&settings)?;
    let snapshot = fetch_snapshot(&store)?;
    let query = PublisherQuery {
        groups: args.group.clone(),
        search: args.search.clone(),
        sort: SortConfig {
            key: match args.sort {
                PublisherSortArg::Name => PublisherSortKey::Name,
                PublisherSortArg::Group => PublisherSortKey::Group,
            },
            direction: if args.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        },
    };
    summary::print_publishers(&query.apply(&snapshot.publishers));
    Ok(())
}

pub fn run_territory(command: &TerritoryCommand) -> Result<()> {
    let settings = Settings::load();
    let store = open_store(&settings)?;
    match command {
        TerritoryCommand::Show { id } => {
            let snapshot = fetch_snapshot(&store)?;
            let territory = snapshot
                .territories
                .iter()
                .find(|t| t.id == *id)
                .ok_or_else(|| anyhow!("territory {id} not found"))?;
            let details = territory_details_for(
                territory,
                &snapshot.publishers,
                &snapshot.assignments,
            );
            summary::print_territory_details(&details);
        }
        TerritoryCommand::Add {
            name,
            kdl,
            gmaps_link,
        } => {
            require_login(&settings)?;
            let territory = store
                .insert_territory(&NewTerritory::new(name, kdl, gmaps_link.clone()))
                .map_err(|error| anyhow!("{}", error.user_message()))?;
            info!(id = territory.id, "territory created");
            println!("Created territory {} ({})", territory.id, territory.name);
            print_fresh_territory(&store, territory.id)?;
        }
        TerritoryCommand::Edit {
            id,
            name,
            kdl,
            gmaps_link,
        } => {
            require_login(&settings)?;
            store
                .update_territory(
                    *id,
                    &TerritoryPatch {
                        name: name.clone(),
                        kdl: kdl.clone(),
                        gmaps_link: gmaps_link.clone(),
                    },
                )
                .map_err(|error| anyhow!("{}", error.user_message()))?;
            println!("Updated territory {id}");
            print_fresh_territory(&store, *id)?;
        }
        TerritoryCommand::Rm { id } => {
            require_login(&settings)?;
            store
                .delete_territory(*id)
                .map_err(|error| anyhow!("{}", error.user_message()))?;
            println!("Deleted territory {id}");
            let snapshot = fetch_snapshot(&store)?;
            summary::print_territories(&snapshot.territories);
        }
    }
    Ok(())
}

pub fn run_publisher(command: &PublisherCommand) -> Result<()> {
    let settings = Settings::load();
    let store = open_store(&settings)?;
    match command {
        PublisherCommand::Show { id } => {
            let snapshot = fetch_snapshot(&store)?;
            let details = publisher_details(
                &snapshot.publishers,
                &snapshot.territories,
                &snapshot.assignments,
            );
            let details = details
                .iter()
                .find(|d| d.publisher.id == *id)
                .ok_or_else(|| anyhow!("publisher {id} not found"))?;
            summary::print_publisher_details(details);
        }
        PublisherCommand::Add { name, group } => {
            require_login(&settings)?;
            let publisher = store
                .insert_publisher(&NewPublisher {
                    name: name.clone(),
                    group: group.clone(),
                })
                .map_err(|error| anyhow!("{}", error.user_message()))?;
            info!(id = publisher.id, "publisher created");
            println!("Created publisher {} ({})", publisher.id, publisher.name);
            print_fresh_publisher(&store, publisher.id)?;
        }
        PublisherCommand::Edit { id, name, group } => {
            require_login(&settings)?;
            store
                .update_publisher(
                    *id,
                    &PublisherPatch {
                        name: name.clone(),
                        group: group.clone(),
                    },
                )
                .map_err(|error| anyhow!("{}", error.user_message()))?;
            println!("Updated publisher {id}");
            print_fresh_publisher(&store, *id)?;
        }
        PublisherCommand::Rm { id } => {
            require_login(&settings)?;
            store
                .delete_publisher(*id)
                .map_err(|error| anyhow!("{}", error.user_message()))?;
            println!("Deleted publisher {id}");
            let snapshot = fetch_snapshot(&store)?;
            summary::print_publishers(&snapshot.publishers);
        }
    }
    Ok(())
}

pub fn run_assign(args: &AssignArgs) -> Result<()> {
    let settings = Settings::load();
    require_login(&settings)?;
    let store = open_store(&settings)?;
    let row = transition::assign(
        &store,
        &AssignRequest {
            territory_id: args.territory_id,
            publisher_id: args.publisher_id,
            start_date: args.start_date.clone(),
            notes: args.notes.clone(),
        },
    )
    .map_err(transition_error)?;
    println!(
        "Assigned territory {} to publisher {} (assignment {})",
        args.territory_id, args.publisher_id, row.id
    );
    print_fresh_territory(&store, args.territory_id)?;
    Ok(())
}

pub fn run_complete(args: &CompleteArgs) -> Result<()> {
    let settings = Settings::load();
    require_login(&settings)?;
    let store = open_store(&settings)?;
    let row = transition::complete(
        &store,
        &CompleteRequest {
            territory_id: args.territory_id,
            completion_date: args.completion_date.clone(),
            notes: args.notes.clone(),
        },
    )
    .map_err(transition_error)?;
    println!(
        "Completed territory {} (assignment {})",
        args.territory_id, row.id
    );
    print_fresh_territory(&store, args.territory_id)?;
    Ok(())
}

fn transition_error(error: StoreError) -> anyhow::Error {
    if matches!(error, StoreError::PartialTransition(_)) {
        return anyhow!("{} Run `bitimaps reconcile` to repair.", error.user_message());
    }
    anyhow!("{}", error.user_message())
}

pub fn run_report() -> Result<()> {
    let settings = Settings::load();
    let store = open_store(&settings)?;
    let snapshot = fetch_snapshot(&store)?;
    let rows = ongoing_assignments(
        &snapshot.territories,
        &snapshot.publishers,
        &snapshot.assignments,
    );
    summary::print_report(&rows, &settings.links.s13_form_link);
    Ok(())
}

pub fn run_reconcile() -> Result<()> {
    let settings = Settings::load();
    require_login(&settings)?;
    let store = open_store(&settings)?;
    let repaired = transition::reconcile(&store)
        .map_err(|error| anyhow!("{}", error.user_message()))?;
    if repaired == 0 {
        println!("All territory statuses are consistent.");
    } else {
        println!("Repaired {repaired} territory status(es).");
    }
    Ok(())
}

pub fn run_link(command: &LinkCommand) -> Result<()> {
    let mut settings = Settings::load();
    match command {
        LinkCommand::Show => println!("{}", settings.links.s13_form_link),
        LinkCommand::Set { url } => {
            settings.links.s13_form_link = url.clone();
            settings.save().map_err(|error| anyhow!(error))?;
            println!("S-13 form link updated.");
        }
    }
    Ok(())
}
