#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use condo_ops::{
    context::ActingContext,
    ledger::{expand_recurring_charge, render_statement},
    model::{
        AdminId, Amount, DateRange, Guard, LedgerTransaction, Period, PlannedShift,
        ResidentAccount, ResidentId, Site, SiteId, SlotKey,
    },
    scheduler::{find_conflicts, Scheduler},
    storage::{JsonStorage, Repository, Storage},
};
use std::num::NonZeroU32;
use tracing::warn;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Affectation refusée pour cause de conflit. 2 : erreur d'usage (clap).
const EXIT_REFUSED: i32 = 3;
/// L'audit a trouvé au moins un agent sur deux postes.
const EXIT_DOUBLE_BOOKED: i32 = 4;

/// CLI d'administration : gardes des résidences et comptes des résidents
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Codes de sortie : 0 succès, 1 erreur, 2 usage invalide, 3 affectation refusée (conflit), 4 double affectation détectée"
)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du jeu de données
    #[arg(long, global = true, default_value = "condo.json")]
    data: String,

    /// Administrateur qui agit
    #[arg(long, global = true, default_value = "admin")]
    admin: String,

    /// Restreint les actions à ces résidences (répétable)
    #[arg(long = "site-scope", global = true)]
    site_scope: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct SlotArgs {
    /// AAAA-MM-JJ
    #[arg(long)]
    date: NaiveDate,
    /// day|night (diurno|nocturno)
    #[arg(long)]
    period: Period,
    #[arg(long)]
    site: String,
    #[arg(long, default_value_t = 1)]
    slot: u16,
}

impl SlotArgs {
    fn key(&self) -> Result<SlotKey> {
        Ok(SlotKey::new(
            SiteId::new(&self.site),
            self.date,
            self.period,
            self.slot,
        )?)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enregistrer une résidence
    AddSite {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 1)]
        guards_per_period: u16,
    },

    /// Enregistrer un agent
    AddGuard {
        #[arg(long)]
        handle: String,
        #[arg(long)]
        name: String,
    },

    /// Ouvrir le compte d'un résident
    AddResident {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        site: String,
    },

    /// Affecter un agent à un poste
    Assign {
        #[command(flatten)]
        slot: SlotArgs,
        #[arg(long)]
        guard: String,
        /// Affecte malgré un conflit (avertissement seulement)
        #[arg(long)]
        force: bool,
    },

    /// Libérer un poste
    Clear {
        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Supprimer l'enregistrement d'un poste
    RemoveSlot {
        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Lister les agents déjà engagés ailleurs pour ce poste
    Conflicts {
        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Vérifier qu'aucun agent n'est sur deux postes au même turno
    Audit,

    /// Postes requis sans agent
    Vacancies {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// Planning d'un agent
    Schedule {
        #[arg(long)]
        guard: String,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// Enregistrer un cargo
    Charge {
        #[arg(long)]
        resident: String,
        #[arg(long)]
        concept: String,
        #[arg(long)]
        amount: Amount,
        /// RFC3339 UTC (maintenant par défaut)
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },

    /// Générer et enregistrer des cargos récurrents
    Recurring {
        #[arg(long)]
        resident: String,
        #[arg(long)]
        concept: String,
        #[arg(long)]
        amount: Amount,
        /// RFC3339 UTC
        #[arg(long)]
        start: DateTime<Utc>,
        /// 1 = mensuel, 2 = bimestriel
        #[arg(long, default_value = "1")]
        interval_months: NonZeroU32,
        #[arg(long)]
        count: u32,
    },

    /// Enregistrer un pago
    Pay {
        #[arg(long)]
        resident: String,
        #[arg(long)]
        concept: String,
        #[arg(long)]
        amount: Amount,
    },

    /// Relevé et solde d'un résident
    Balance {
        #[arg(long)]
        resident: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let ctx = if cli.site_scope.is_empty() {
        ActingContext::new(AdminId::new(&cli.admin))
    } else {
        ActingContext::scoped(AdminId::new(&cli.admin), cli.site_scope.iter().map(SiteId::new))
    };
    let storage = JsonStorage::open(&cli.data)?;

    let code = match cli.cmd {
        Commands::AddSite {
            id,
            name,
            guards_per_period,
        } => {
            let site_id = SiteId::new(&id);
            ctx.ensure_site(&site_id)?;
            storage.update(|condo| {
                if condo.roster.find_site(&site_id).is_some() {
                    bail!("site already exists: {id}");
                }
                let site = Site::staffed(site_id.clone(), name, guards_per_period)?;
                condo.roster.sites.push(site);
                Ok(())
            })?;
            0
        }
        Commands::AddGuard { handle, name } => {
            storage.update(|condo| {
                if condo.roster.find_guard_by_handle(&handle).is_some() {
                    bail!("guard handle already taken: {handle}");
                }
                condo.roster.guards.push(Guard::new(handle.clone(), name));
                Ok(())
            })?;
            0
        }
        Commands::AddResident {
            id,
            name,
            address,
            site,
        } => {
            let site = SiteId::new(site);
            ctx.ensure_site(&site)?;
            let resident = ResidentId::new(&id);
            storage.update(|condo| {
                if condo.find_account(&resident).is_some() {
                    bail!("resident already exists: {id}");
                }
                condo
                    .accounts
                    .push(ResidentAccount::new(resident.clone(), name, address, site));
                Ok(())
            })?;
            0
        }
        Commands::Assign { slot, guard, force } => {
            let key = slot.key()?;
            ctx.ensure_site(&key.site)?;
            let condo = storage.load()?;
            let chosen = condo
                .roster
                .find_guard_by_handle(&guard)
                .ok_or_else(|| anyhow!("unknown guard: {guard}"))?
                .clone();

            let shifts = storage.list_shifts(&DateRange::single(key.date), None)?;
            let report = find_conflicts(&key, &shifts, &condo.roster.sites);
            match report.attribution(&chosen.id) {
                Some(taken) if !force => {
                    eprintln!(
                        "{} already works at {} on {} ({}); use --force to assign anyway",
                        chosen.handle, taken.site_name, key.date, key.period
                    );
                    EXIT_REFUSED
                }
                taken => {
                    if let Some(taken) = taken {
                        warn!(guard = %chosen.handle, site = %taken.site, "forced double booking");
                        eprintln!("Warning: {} also works at {}", chosen.handle, taken.site_name);
                    }
                    storage.upsert_shift(&PlannedShift::new(key, Some(chosen.id)))?;
                    0
                }
            }
        }
        Commands::Clear { slot } => {
            let key = slot.key()?;
            ctx.ensure_site(&key.site)?;
            with_scheduler(&storage, |scheduler| scheduler.clear(&key))?;
            0
        }
        Commands::RemoveSlot { slot } => {
            let key = slot.key()?;
            ctx.ensure_site(&key.site)?;
            if !with_scheduler(&storage, |scheduler| scheduler.remove_slot(&key))? {
                eprintln!("no slot recorded for {key}");
            }
            0
        }
        Commands::Conflicts { slot } => {
            let key = slot.key()?;
            ctx.ensure_site(&key.site)?;
            let condo = storage.load()?;
            let scheduler = Scheduler::with_roster(condo.roster);
            let report = scheduler.find_conflicts(&key);
            if report.is_empty() {
                println!("OK: every guard is available for {key}");
            }
            for (guard_id, taken) in report.iter() {
                let handle = scheduler
                    .roster()
                    .find_guard_by_id(guard_id)
                    .map_or(guard_id.as_str(), |g| g.handle.as_str());
                println!("{handle} | {}", taken.site_name);
            }
            0
        }
        Commands::Audit => {
            let condo = storage.load()?;
            let scheduler = Scheduler::with_roster(condo.roster);
            let bookings = scheduler.detect_double_bookings();
            if bookings.is_empty() {
                println!("OK: no double booking");
                0
            } else {
                eprintln!("Found {} double booking(s)", bookings.len());
                for booking in &bookings {
                    let handle = scheduler
                        .roster()
                        .find_guard_by_id(&booking.guard)
                        .map_or(booking.guard.as_str(), |g| g.handle.as_str());
                    let slots: Vec<String> = booking.slots.iter().map(ToString::to_string).collect();
                    println!("{handle} | {}", slots.join(" ; "));
                }
                EXIT_DOUBLE_BOOKED
            }
        }
        Commands::Vacancies { from, to } => {
            let range = DateRange::new(from, to)?;
            let condo = storage.load()?;
            let scheduler = Scheduler::with_roster(condo.roster);
            for key in scheduler.vacancies(&range) {
                if ctx.covers(&key.site) {
                    println!("{key}");
                }
            }
            0
        }
        Commands::Schedule { guard, from, to } => {
            let range = DateRange::new(from, to)?;
            let condo = storage.load()?;
            let scheduler = Scheduler::with_roster(condo.roster);
            let chosen = scheduler
                .roster()
                .find_guard_by_handle(&guard)
                .ok_or_else(|| anyhow!("unknown guard: {guard}"))?;
            for shift in scheduler.guard_schedule(&chosen.id, &range) {
                if !ctx.covers(&shift.site) {
                    continue;
                }
                let site = scheduler
                    .roster()
                    .find_site(&shift.site)
                    .map_or(shift.site.as_str(), |s| s.name.as_str());
                println!("{} | {} | {} | #{}", shift.date, shift.period, site, shift.slot);
            }
            0
        }
        Commands::Charge {
            resident,
            concept,
            amount,
            date,
        } => {
            let resident = ResidentId::new(resident);
            ensure_resident_scope(&storage, &ctx, &resident)?;
            let tx = ctx.stamp(LedgerTransaction::charge(
                concept,
                amount,
                date.unwrap_or_else(Utc::now),
            ));
            storage.append_transaction(&resident, &tx)?;
            0
        }
        Commands::Recurring {
            resident,
            concept,
            amount,
            start,
            interval_months,
            count,
        } => {
            let resident = ResidentId::new(resident);
            ensure_resident_scope(&storage, &ctx, &resident)?;
            let charges = expand_recurring_charge(start, interval_months, &concept, amount, count);
            storage.update(|condo| {
                let account = condo
                    .find_account_mut(&resident)
                    .ok_or_else(|| anyhow!("unknown resident: {}", resident.as_str()))?;
                for tx in &charges {
                    account.append(ctx.stamp(tx.clone()));
                }
                Ok(())
            })?;
            println!("{} charge(s) recorded", charges.len());
            0
        }
        Commands::Pay {
            resident,
            concept,
            amount,
        } => {
            let resident = ResidentId::new(resident);
            ensure_resident_scope(&storage, &ctx, &resident)?;
            let tx = ctx.stamp(LedgerTransaction::payment(concept, amount, Utc::now()));
            storage.append_transaction(&resident, &tx)?;
            0
        }
        Commands::Balance { resident } => {
            let resident = ResidentId::new(resident);
            let condo = storage.load()?;
            let mut account = condo
                .find_account(&resident)
                .cloned()
                .ok_or_else(|| anyhow!("unknown resident: {}", resident.as_str()))?;
            ctx.ensure_site(&account.site)?;
            account.transactions = storage.list_transactions(&resident)?;
            print!("{}", render_statement(&account));
            0
        }
    };

    std::process::exit(code);
}

/// Exécute `f` sur le roster persisté puis sauvegarde.
fn with_scheduler<T>(storage: &JsonStorage, f: impl FnOnce(&mut Scheduler) -> T) -> Result<T> {
    storage.update(|condo| {
        let mut scheduler = Scheduler::with_roster(std::mem::take(&mut condo.roster));
        let out = f(&mut scheduler);
        condo.roster = scheduler.into_roster();
        Ok(out)
    })
}

fn ensure_resident_scope(storage: &JsonStorage, ctx: &ActingContext, resident: &ResidentId) -> Result<()> {
    let condo = storage.load()?;
    let account = condo
        .find_account(resident)
        .with_context(|| format!("unknown resident: {}", resident.as_str()))?;
    ctx.ensure_site(&account.site)?;
    Ok(())
}
