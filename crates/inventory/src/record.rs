use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use stockroom_core::{DomainError, DomainResult, Entity, RecordId};

/// A single inventory entry.
///
/// Every constructor and setter validates before assigning, so a `Record`
/// can never hold an empty name, a negative quantity or a negative price.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    name: String,
    quantity: u64,
    price: f64,
}

impl Record {
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        quantity: i64,
        price: f64,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: RecordId::new(id)?,
            name: validate_name(name.as_ref())?,
            quantity: validate_quantity(quantity)?,
            price: validate_price(price)?,
        })
    }

    pub fn id_typed(&self) -> &RecordId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Stock value of this entry (quantity × price), unrounded.
    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    pub fn set_id(&mut self, id: impl AsRef<str>) -> DomainResult<()> {
        self.id = RecordId::new(id)?;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl AsRef<str>) -> DomainResult<()> {
        self.name = validate_name(name.as_ref())?;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        self.quantity = validate_quantity(quantity)?;
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> DomainResult<()> {
        self.price = validate_price(price)?;
        Ok(())
    }
}

impl Entity for Record {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Record {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}] {} | Qty: {} | Price: ${:.2}",
            self.id, self.name, self.quantity, self.price
        )
    }
}

fn validate_name(raw: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_quantity(quantity: i64) -> DomainResult<u64> {
    u64::try_from(quantity).map_err(|_| {
        DomainError::validation(format!("quantity cannot be negative (got {quantity})"))
    })
}

fn validate_price(price: f64) -> DomainResult<f64> {
    if !price.is_finite() {
        return Err(DomainError::validation("price must be a finite number"));
    }
    if price < 0.0 {
        return Err(DomainError::validation(format!(
            "price cannot be negative (got {price})"
        )));
    }
    // Normalise -0.0 so it renders as 0.00.
    Ok(price.abs())
}

/// Plain field mapping used for persistence.
///
/// Missing fields fall back to `""` / `0` / `0.0`; the result still has to
/// pass `Record::try_from`. Files written with Spanish keys
/// (`nombre`, `cantidad`, `precio`) are accepted on read, and so are
/// quantities written as whole floats or numeric strings and prices written
/// as numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordData {
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "cantidad", deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    #[serde(alias = "precio", deserialize_with = "lenient_price")]
    pub price: f64,
}

/// Integer, whole-valued float (`3.0`) or numeric string (`"4"`).
fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| D::Error::custom(format!("quantity must be an integer, got {value}")))
}

/// Number or numeric string (`"2.5"`).
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| D::Error::custom(format!("price must be a number, got {value}")))
}

impl TryFrom<RecordData> for Record {
    type Error = DomainError;

    fn try_from(data: RecordData) -> Result<Self, Self::Error> {
        Record::new(data.id, data.name, data.quantity, data.price)
    }
}

impl From<&Record> for RecordData {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            // Quantities above i64::MAX cannot be produced by the validated setters.
            quantity: i64::try_from(record.quantity).unwrap_or(i64::MAX),
            price: record.price,
        }
    }
}
