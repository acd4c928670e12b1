use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Erreurs de validation levées à la construction des valeurs du domaine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("slot must be a positive integer")]
    ZeroSlot,
    #[error("a site needs at least one guard per period")]
    ZeroGuardsPerPeriod,
    #[error("amount must be strictly positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("unknown period: {0}")]
    UnknownPeriod(String),
    #[error("unknown transaction kind: {0}")]
    UnknownKind(String),
    #[error("invalid date range: {end} is before {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// Identifiant fort pour Guard
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuardId(String);

impl GuardId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant d'une résidence / copropriété (choisi par l'administrateur).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(String);

impl SiteId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResidentId(String);

impl ResidentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Administrateur à l'origine d'une action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminId(String);

impl AdminId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Turno : jour (« Diurno ») ou nuit (« Nocturno »).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    Day,
    Night,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Day, Period::Night];

    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "Diurno",
            Period::Night => "Nocturno",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "diurno" | "d" => Ok(Period::Day),
            "night" | "nocturno" | "n" => Ok(Period::Night),
            _ => Err(ValidationError::UnknownPeriod(s.to_string())),
        }
    }
}

/// Clé naturelle d'un poste : (site, date, turno, slot).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub site: SiteId,
    pub date: NaiveDate,
    pub period: Period,
    pub slot: u16,
}

impl SlotKey {
    /// Crée une clé en validant `slot >= 1`.
    pub fn new(site: SiteId, date: NaiveDate, period: Period, slot: u16) -> Result<Self, ValidationError> {
        if slot == 0 {
            return Err(ValidationError::ZeroSlot);
        }
        Ok(Self {
            site,
            date,
            period,
            slot,
        })
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} #{}", self.date, self.period, self.site, self.slot)
    }
}

/// Poste de garde planifié. `guard == None` signifie poste vacant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredShift")]
pub struct PlannedShift {
    pub date: NaiveDate,
    pub site: SiteId,
    pub period: Period,
    pub slot: u16,
    pub guard: Option<GuardId>,
}

impl PlannedShift {
    pub fn new(key: SlotKey, guard: Option<GuardId>) -> Self {
        Self {
            date: key.date,
            site: key.site,
            period: key.period,
            slot: key.slot,
            guard,
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey {
            site: self.site.clone(),
            date: self.date,
            period: self.period,
            slot: self.slot,
        }
    }

    pub fn has_key(&self, key: &SlotKey) -> bool {
        self.site == key.site && self.date == key.date && self.period == key.period && self.slot == key.slot
    }
}

/// Forme persistée d'un poste, validée via `SlotKey::new` au chargement.
#[derive(Deserialize)]
struct StoredShift {
    date: NaiveDate,
    site: SiteId,
    period: Period,
    slot: u16,
    #[serde(default)]
    guard: Option<GuardId>,
}

impl TryFrom<StoredShift> for PlannedShift {
    type Error = ValidationError;

    fn try_from(raw: StoredShift) -> Result<Self, Self::Error> {
        let key = SlotKey::new(raw.site, raw.date, raw.period, raw.slot)?;
        Ok(PlannedShift::new(key, raw.guard))
    }
}

/// Résidence couverte par les gardes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(default = "default_guards_per_period")]
    pub guards_per_period: u16,
}

fn default_guards_per_period() -> u16 {
    1
}

impl Site {
    pub fn new<N: Into<String>>(id: SiteId, name: N) -> Self {
        Self {
            id,
            name: name.into(),
            guards_per_period: default_guards_per_period(),
        }
    }

    /// Résidence exigeant `guards_per_period` agents par turno (au moins 1).
    pub fn staffed<N: Into<String>>(id: SiteId, name: N, guards_per_period: u16) -> Result<Self, ValidationError> {
        if guards_per_period == 0 {
            return Err(ValidationError::ZeroGuardsPerPeriod);
        }
        Ok(Self {
            id,
            name: name.into(),
            guards_per_period,
        })
    }
}

/// Agent de sécurité
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guard {
    pub id: GuardId,
    pub handle: String,
    pub display_name: String,
}

impl Guard {
    pub fn new<H: Into<String>, D: Into<String>>(handle: H, display_name: D) -> Self {
        Self {
            id: GuardId::random(),
            handle: handle.into(),
            display_name: display_name.into(),
        }
    }
}

/// Intervalle de dates inclusif `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Itère sur chaque jour de l'intervalle.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| d.succ_opt().filter(|n| *n <= end))
    }
}

/// Montant strictement positif, en décimal fixe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| ValidationError::InvalidAmount(s.to_string()))?;
        Amount::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Charge,
    Payment,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Charge => f.write_str("Cargo"),
            TransactionKind::Payment => f.write_str("Pago"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "charge" | "cargo" => Ok(TransactionKind::Charge),
            "payment" | "pago" | "abono" => Ok(TransactionKind::Payment),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// Écriture du grand livre d'un résident. Jamais modifiée après création.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: TransactionId,
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub concept: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<AdminId>,
}

impl LedgerTransaction {
    pub fn new<C: Into<String>>(kind: TransactionKind, concept: C, amount: Amount, date: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::random(),
            date,
            kind,
            concept: concept.into(),
            amount,
            recorded_by: None,
        }
    }

    pub fn charge<C: Into<String>>(concept: C, amount: Amount, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Charge, concept, amount, date)
    }

    pub fn payment<C: Into<String>>(concept: C, amount: Amount, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Payment, concept, amount, date)
    }

    pub fn recorded_by(mut self, admin: AdminId) -> Self {
        self.recorded_by = Some(admin);
        self
    }

    /// Contribution au solde : positive pour un cargo, négative pour un pago.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Charge => self.amount.value(),
            TransactionKind::Payment => -self.amount.value(),
        }
    }
}

/// Compte d'un résident ; le solde est toujours dérivé des transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentAccount {
    pub resident_id: ResidentId,
    pub resident_name: String,
    pub address: String,
    pub site: SiteId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<LedgerTransaction>,
}

impl ResidentAccount {
    pub fn new<N: Into<String>, A: Into<String>>(resident_id: ResidentId, resident_name: N, address: A, site: SiteId) -> Self {
        Self {
            resident_id,
            resident_name: resident_name.into(),
            address: address.into(),
            site,
            transactions: Vec::new(),
        }
    }
}

/// Planning des gardes : résidences, agents et postes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub guards: Vec<Guard>,
    #[serde(default)]
    pub shifts: Vec<PlannedShift>,
}

impl Roster {
    pub fn find_site<'a>(&'a self, id: &SiteId) -> Option<&'a Site> {
        self.sites.iter().find(|s| &s.id == id)
    }
    pub fn find_guard_by_handle<'a>(&'a self, handle: &str) -> Option<&'a Guard> {
        self.guards.iter().find(|g| g.handle == handle)
    }
    pub fn find_guard_by_id<'a>(&'a self, id: &GuardId) -> Option<&'a Guard> {
        self.guards.iter().find(|g| &g.id == id)
    }
    pub fn find_shift<'a>(&'a self, key: &SlotKey) -> Option<&'a PlannedShift> {
        self.shifts.iter().find(|s| s.has_key(key))
    }
    pub fn find_shift_mut(&mut self, key: &SlotKey) -> Option<&mut PlannedShift> {
        self.shifts.iter_mut().find(|s| s.has_key(key))
    }
}

/// Jeu de données complet persisté par le stockage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Condo {
    #[serde(default)]
    pub roster: Roster,
    #[serde(default)]
    pub accounts: Vec<ResidentAccount>,
}

impl Condo {
    pub fn find_account<'a>(&'a self, id: &ResidentId) -> Option<&'a ResidentAccount> {
        self.accounts.iter().find(|a| &a.resident_id == id)
    }
    pub fn find_account_mut(&mut self, id: &ResidentId) -> Option<&mut ResidentAccount> {
        self.accounts.iter_mut().find(|a| &a.resident_id == id)
    }
}
