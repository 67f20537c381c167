//! CLI entrypoint for Condo Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use condo_application::{
    CastVoteUseCase, EvaluateQuorumUseCase, GovernanceConfig, GovernanceEventPublisher,
    GovernanceRepository, ManageProxiesUseCase, RecordAttendanceUseCase, ScheduleMeetingUseCase,
    TallyVotesUseCase,
};
use condo_domain::{
    AgendaItemId, MeetingId, MemberId, NewProxy, OutputFormat, ProxyId, ScheduleOptionId,
};
use condo_infrastructure::{
    ConfigLoader, FileConfig, InMemoryGovernanceStore, JsonSnapshotFile, JsonlEventLog,
    TracingEventPublisher,
};
use condo_presentation::{
    AttendanceReport, Cli, Command, PreferenceReport, ProxyCommand, ProxyDirection,
    ProxyListReport, ProxyReport, QuorumReport, RankingReport, Report, ScheduleCommand,
    SelectionReport, TallyReport, VoteReport, WeightsReport, render,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Everything a command needs: the loaded store plus the wiring around it
struct App {
    store: Arc<InMemoryGovernanceStore>,
    config: GovernanceConfig,
    events: Arc<dyn GovernanceEventPublisher>,
    format: OutputFormat,
}

impl App {
    fn print(&self, report: &impl Report) {
        println!("{}", render(report, self.format).trim_end());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let file_config = load_config(&cli)?;
    let config = file_config
        .to_governance_config()
        .context("Invalid configuration")?;

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run with --help to see the available commands.");
    };
    let Some(data) = cli.data.clone() else {
        bail!("--data <PATH> is required: the governance snapshot to work on.");
    };

    info!("Starting Condo Quorum on {}", data.display());

    // === Dependency Injection ===
    let snapshot = JsonSnapshotFile::load(&data)?;
    let store = Arc::new(InMemoryGovernanceStore::new(snapshot));
    let events = event_publisher(&file_config);

    let format = cli
        .output
        .map(Into::into)
        .or(file_config.output.format)
        .unwrap_or_default();

    let ctx = App {
        store,
        config,
        events,
        format,
    };

    run(&ctx, &command).await?;

    if command.is_mutating() {
        JsonSnapshotFile::save(&data, &ctx.store.snapshot().await)?;
        debug!("Saved snapshot to {}", data.display());
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }
    ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{}", e))
}

fn event_publisher(config: &FileConfig) -> Arc<dyn GovernanceEventPublisher> {
    let Some(path) = config.logging.event_log.as_ref() else {
        return Arc::new(TracingEventPublisher::new());
    };

    match JsonlEventLog::open(path) {
        Ok(log) => {
            info!("Writing governance events to {}", log.path().display());
            Arc::new(TracingEventPublisher::forwarding_to(Arc::new(log)))
        }
        Err(e) => {
            warn!("{}; continuing without an event log", e);
            Arc::new(TracingEventPublisher::new())
        }
    }
}

async fn run(ctx: &App, command: &Command) -> Result<()> {
    match command {
        Command::Quorum { meeting } => {
            let meeting = MeetingId::new(meeting);
            let result = EvaluateQuorumUseCase::new(ctx.store.clone(), &ctx.config)
                .execute(&meeting)
                .await?;
            ctx.print(&QuorumReport {
                meeting: &meeting,
                result: &result,
            });
        }

        Command::Weights { meeting } => {
            let meeting = MeetingId::new(meeting);
            let members = EvaluateQuorumUseCase::new(ctx.store.clone(), &ctx.config)
                .member_weights(&meeting)
                .await?;
            ctx.print(&WeightsReport {
                meeting: &meeting,
                members: &members,
            });
        }

        Command::Tally { item } => {
            let item = AgendaItemId::new(item);
            let result = TallyVotesUseCase::new(ctx.store.clone(), &ctx.config)
                .execute(&item)
                .await?;
            ctx.print(&TallyReport {
                item: &item,
                result: &result,
            });
        }

        Command::Vote {
            item,
            member,
            choice,
            on_behalf_of,
        } => {
            let use_case = CastVoteUseCase::new(ctx.store.clone()).with_events(ctx.events.clone());
            let item = AgendaItemId::new(item);
            let member = MemberId::new(member);
            let vote = match on_behalf_of {
                Some(grantor) => {
                    use_case
                        .cast_for(&item, &member, &MemberId::new(grantor), choice.clone())
                        .await?
                }
                None => use_case.cast(&item, &member, choice.clone()).await?,
            };
            ctx.print(&VoteReport { vote: &vote });
        }

        Command::Proxy(command) => run_proxy(ctx, command).await?,

        Command::Attend {
            meeting,
            member,
            kind,
        } => {
            let attendance = RecordAttendanceUseCase::new(ctx.store.clone())
                .with_events(ctx.events.clone())
                .check_in(&MeetingId::new(meeting), &MemberId::new(member), *kind)
                .await?;
            ctx.print(&AttendanceReport {
                attendance: &attendance,
            });
        }

        Command::Leave { meeting, member } => {
            let attendance = RecordAttendanceUseCase::new(ctx.store.clone())
                .with_events(ctx.events.clone())
                .check_out(&MeetingId::new(meeting), &MemberId::new(member))
                .await?;
            ctx.print(&AttendanceReport {
                attendance: &attendance,
            });
        }

        Command::Schedule(command) => run_schedule(ctx, command).await?,
    }
    Ok(())
}

async fn run_proxy(ctx: &App, command: &ProxyCommand) -> Result<()> {
    let use_case = ManageProxiesUseCase::new(ctx.store.clone(), &ctx.config)
        .with_events(ctx.events.clone());

    match command {
        ProxyCommand::Create {
            grantor,
            grantee,
            meeting,
            from,
            until,
            document,
        } => {
            let grantor = MemberId::new(grantor);
            // proxies live in the grantor's organization
            let organization = ctx
                .store
                .member(&grantor)
                .await?
                .map(|m| m.organization_id)
                .with_context(|| format!("Unknown member: {}", grantor))?;

            let mut input = match meeting {
                Some(meeting) => {
                    NewProxy::for_meeting(organization, grantor, grantee.as_str(), meeting.as_str())
                }
                None => NewProxy::general(organization, grantor, grantee.as_str()),
            };
            if let Some(from) = from {
                input = input.valid_from(*from);
            }
            if let Some(until) = until {
                input = input.valid_until(*until);
            }
            if let Some(document) = document {
                input = input.with_document(document.as_str());
            }

            let proxy = use_case.create(input).await?;
            ctx.print(&ProxyReport {
                action: "created",
                proxy: &proxy,
            });
        }

        ProxyCommand::Revoke { id } => {
            let proxy = use_case.revoke(&ProxyId::new(id)).await?;
            ctx.print(&ProxyReport {
                action: "revoked",
                proxy: &proxy,
            });
        }

        ProxyCommand::Delete { id } => {
            let proxy = use_case.delete(&ProxyId::new(id)).await?;
            ctx.print(&ProxyReport {
                action: "deleted",
                proxy: &proxy,
            });
        }

        ProxyCommand::List {
            meeting,
            member,
            outgoing,
        } => {
            let meeting = MeetingId::new(meeting);
            let member = MemberId::new(member);
            let (direction, proxies) = if *outgoing {
                (
                    ProxyDirection::Outgoing,
                    use_case.outgoing(&member, &meeting).await?,
                )
            } else {
                (
                    ProxyDirection::Incoming,
                    use_case.incoming(&member, &meeting).await?,
                )
            };
            ctx.print(&ProxyListReport {
                meeting: &meeting,
                member: &member,
                direction,
                proxies: &proxies,
            });
        }
    }
    Ok(())
}

async fn run_schedule(ctx: &App, command: &ScheduleCommand) -> Result<()> {
    let use_case = ScheduleMeetingUseCase::new(ctx.store.clone()).with_events(ctx.events.clone());

    match command {
        ScheduleCommand::Rank { meeting } => {
            let meeting = MeetingId::new(meeting);
            let ranking = use_case.ranking(&meeting).await?;
            let options = ctx.store.schedule_options(&meeting).await?;
            ctx.print(&RankingReport {
                meeting: &meeting,
                ranking: &ranking,
                options: &options,
            });
        }

        ScheduleCommand::Select { meeting, option } => {
            let meeting = MeetingId::new(meeting);
            let option = match option {
                Some(option) => ScheduleOptionId::new(option),
                None => use_case
                    .winner(&meeting)
                    .await?
                    .map(|o| o.id)
                    .with_context(|| format!("{} has no candidate dates", meeting))?,
            };
            let selected = use_case.select_winner(&meeting, &option).await?;
            ctx.print(&SelectionReport {
                meeting: &meeting,
                selected: &selected,
            });
        }

        ScheduleCommand::Prefer {
            meeting,
            option,
            member,
            preference,
        } => {
            let meeting = MeetingId::new(meeting);
            let vote = use_case
                .vote(
                    &meeting,
                    &ScheduleOptionId::new(option),
                    &MemberId::new(member),
                    *preference,
                )
                .await?;
            ctx.print(&PreferenceReport {
                meeting: &meeting,
                vote: &vote,
            });
        }
    }
    Ok(())
}
