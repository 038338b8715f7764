//! Command handlers.
//!
//! Both interface families expose the same verbs, so one generic handler
//! drives them; the per-family modules only supply table rows and detail
//! views.

pub mod ethernet;
pub mod tunnel;
pub mod util;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tabled::Tabled;
use tracing::debug;

use panofly_core::{DeleteTarget, Device, Entity, Family, Namespace, Scope};

use crate::cli::{Command, GlobalOpts, InterfaceCommand, WriteArgs};
use crate::error::CliError;
use crate::output;

/// Everything a connected command needs.
pub struct Session {
    pub device: Device,
    pub scope: Scope,
    /// Profile vsys, used when `--vsys` is absent.
    pub vsys: Option<String>,
}

impl Session {
    fn vsys(&self, args: &WriteArgs) -> Result<String, CliError> {
        args.vsys
            .clone()
            .or_else(|| self.vsys.clone())
            .filter(|v| !v.is_empty())
            .ok_or(CliError::NoVsys)
    }
}

/// How a family renders itself on the terminal.
pub trait InterfaceView: Family {
    type Row: Tabled;

    /// The subcommand name.
    const COMMAND: &'static str;

    fn row(entry: &Self::Entry) -> Self::Row;
    fn detail(entry: &Self::Entry) -> String;
}

pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Ethernet(args) => {
            handle::<panofly_core::eth::EthernetFamily>(
                &session.device.ethernet(),
                args.command,
                session,
                global,
            )
            .await
        }
        Command::Tunnel(args) => {
            handle::<panofly_core::tunnel::TunnelFamily>(
                &session.device.tunnel(),
                args.command,
                session,
                global,
            )
            .await
        }
        Command::Completions(_) => Ok(()),
    }
}

async fn handle<F>(
    ns: &Namespace<F>,
    cmd: InterfaceCommand,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    F: InterfaceView,
    F::Entry: Serialize + DeserializeOwned,
{
    let scope = &session.scope;
    debug!(command = F::COMMAND, %scope, "running interface command");

    match cmd {
        InterfaceCommand::List(read) => {
            let names = if read.running {
                ns.show_list(scope).await?
            } else {
                ns.get_list(scope).await?
            };
            output::print_output(&output::render_names(&global.output, &names), global.quiet);
            Ok(())
        }

        InterfaceCommand::Get { name, read } => {
            let entry = if read.running {
                ns.show(scope, &name).await?
            } else {
                ns.get(scope, &name).await?
            };
            let out = output::render_single(&global.output, &entry, F::detail, |e| {
                e.name().to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InterfaceCommand::GetAll(read) => {
            let entries = if read.running {
                ns.show_all(scope).await?
            } else {
                ns.get_all(scope).await?
            };
            let out = output::render_list(&global.output, &entries, F::row, |e| {
                e.name().to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InterfaceCommand::Set(args) => {
            let vsys = session.vsys(&args)?;
            let entries: Vec<F::Entry> =
                util::parse_entries(util::read_json_file(&args.from_file)?)?;
            ns.set(scope, &vsys, &entries).await?;
            if !global.quiet {
                eprintln!(
                    "Set {} {} in {scope} ({vsys})",
                    entries.len(),
                    ns.labels().plural
                );
            }
            Ok(())
        }

        InterfaceCommand::Edit(args) => {
            let vsys = session.vsys(&args)?;
            let entry: F::Entry = util::parse_entry(util::read_json_file(&args.from_file)?)?;
            ns.edit(scope, &vsys, &entry).await?;
            if !global.quiet {
                eprintln!("Edited {} '{}'", ns.labels().singular, entry.name());
            }
            Ok(())
        }

        InterfaceCommand::Delete { names } => {
            let prompt = format!(
                "Delete {} {} from {scope}?",
                ns.labels().plural,
                names.join(", ")
            );
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            let targets: Vec<DeleteTarget<F::Entry>> =
                names.into_iter().map(DeleteTarget::ByName).collect();
            ns.delete(scope, &targets).await?;
            if !global.quiet {
                eprintln!("Deleted {} {}", targets.len(), ns.labels().plural);
            }
            Ok(())
        }
    }
}
