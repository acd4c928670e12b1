use crate::model::{Condo, DateRange, LedgerTransaction, PlannedShift, ResidentId, SiteId};
use anyhow::{anyhow, Context};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub trait Storage {
    /// Charge le jeu de données depuis un support.
    fn load(&self) -> anyhow::Result<Condo>;
    /// Sauvegarde de manière atomique.
    fn save(&self, condo: &Condo) -> anyhow::Result<()>;

    /// Lecture-modification-écriture ; rien n'est sauvegardé si `f` échoue.
    fn update<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut Condo) -> anyhow::Result<T>,
    {
        let mut condo = self.load()?;
        let out = f(&mut condo)?;
        self.save(&condo)?;
        Ok(out)
    }
}

/// Accès par entité consommé par le planning et le grand livre.
pub trait Repository {
    fn list_shifts(&self, range: &DateRange, sites: Option<&[SiteId]>) -> anyhow::Result<Vec<PlannedShift>>;
    /// Insère ou remplace le poste de même clé (site, date, turno, slot).
    fn upsert_shift(&self, shift: &PlannedShift) -> anyhow::Result<()>;
    fn list_transactions(&self, resident: &ResidentId) -> anyhow::Result<Vec<LedgerTransaction>>;
    fn append_transaction(&self, resident: &ResidentId, tx: &LedgerTransaction) -> anyhow::Result<()>;
}

impl<S: Storage> Repository for S {
    fn list_shifts(&self, range: &DateRange, sites: Option<&[SiteId]>) -> anyhow::Result<Vec<PlannedShift>> {
        let condo = self.load()?;
        Ok(condo
            .roster
            .shifts
            .into_iter()
            .filter(|s| range.contains(s.date))
            .filter(|s| sites.map_or(true, |ids| ids.contains(&s.site)))
            .collect())
    }

    fn upsert_shift(&self, shift: &PlannedShift) -> anyhow::Result<()> {
        let key = shift.key();
        self.update(|condo| {
            match condo.roster.find_shift_mut(&key) {
                Some(existing) => existing.guard = shift.guard.clone(),
                None => condo.roster.shifts.push(shift.clone()),
            }
            Ok(())
        })
    }

    fn list_transactions(&self, resident: &ResidentId) -> anyhow::Result<Vec<LedgerTransaction>> {
        let condo = self.load()?;
        let account = condo
            .find_account(resident)
            .ok_or_else(|| anyhow!("unknown resident: {}", resident.as_str()))?;
        Ok(account.transactions.clone())
    }

    fn append_transaction(&self, resident: &ResidentId, tx: &LedgerTransaction) -> anyhow::Result<()> {
        self.update(|condo| {
            let account = condo
                .find_account_mut(resident)
                .ok_or_else(|| anyhow!("unknown resident: {}", resident.as_str()))?;
            account.append(tx.clone());
            Ok(())
        })
    }
}

pub struct JsonStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    /// Un fichier absent donne un jeu de données vide.
    fn load(&self) -> anyhow::Result<Condo> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no data file yet, starting empty");
                return Ok(Condo::default());
            }
            Err(err) => return Err(err).with_context(|| format!("reading {}", self.path.display())),
        };
        let condo: Condo = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(condo)
    }

    fn save(&self, condo: &Condo) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(condo)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        debug!(path = %self.path.display(), bytes = json.len(), "dataset saved");
        Ok(())
    }

    fn update<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut Condo) -> anyhow::Result<T>,
    {
        let _guard = self.lock.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        let mut condo = self.load()?;
        let out = f(&mut condo)?;
        self.save(&condo)?;
        Ok(out)
    }
}

/// Stockage en mémoire, pour les tests et les appelants embarqués.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    condo: Mutex<Condo>,
}

impl MemoryStorage {
    pub fn new(condo: Condo) -> Self {
        Self {
            condo: Mutex::new(condo),
        }
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> anyhow::Result<Condo> {
        let condo = self.condo.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(condo.clone())
    }

    fn save(&self, condo: &Condo) -> anyhow::Result<()> {
        let mut current = self.condo.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        *current = condo.clone();
        Ok(())
    }

    fn update<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut Condo) -> anyhow::Result<T>,
    {
        let mut current = self.condo.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        let mut draft = current.clone();
        let out = f(&mut draft)?;
        *current = draft;
        Ok(out)
    }
}
