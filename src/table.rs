//! OID to cast dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cast::{
    BinaryCast, BooleanCast, BytesCast, Cast, DecimalCast, DecimalSupport, FloatCast, IntegerCast,
    LongIntegerCast, UnicodeCast,
};
use crate::context::CastContext;
use crate::error::{Error, Result};
use crate::field::RawField;
use crate::oid::{self, Oid};
use crate::opts::{CastOpts, TemporalBackend, TextModel};
use crate::temporal::{DateCast, IntervalCast, TimeCast};
use crate::value::Value;

/// Shared handle to a cast.
pub type CastRef = Arc<dyn Cast>;

/// Immutable mapping from type OIDs to casts.
///
/// Built once from [`CastOpts`]. OIDs that share a cast share the same
/// instance, so [`Arc::ptr_eq`] holds between them.
#[derive(Debug, Clone)]
pub struct CastTable {
    by_oid: HashMap<Oid, CastRef>,
    by_name: HashMap<&'static str, CastRef>,
    fallback: CastRef,
    temporal_backend: TemporalBackend,
    decimal_support: DecimalSupport,
}

impl Default for CastTable {
    fn default() -> Self {
        Self::new(&CastOpts::default())
    }
}

impl CastTable {
    /// Table with the built-in casts.
    pub fn new(opts: &CastOpts) -> Self {
        CastTableBuilder::new(opts).build()
    }

    /// Builder with the built-in casts, for adding or overriding OIDs.
    pub fn builder(opts: &CastOpts) -> CastTableBuilder {
        CastTableBuilder::new(opts)
    }

    /// Cast for `oid`.
    pub fn resolve(&self, oid: Oid) -> Result<&CastRef> {
        self.by_oid.get(&oid).ok_or_else(|| {
            debug!(oid, "no cast registered");
            Error::UnknownType(oid)
        })
    }

    /// Cast for `oid`, or the raw bytes cast when none is registered.
    pub fn resolve_or_bytes(&self, oid: Oid) -> &CastRef {
        self.by_oid.get(&oid).unwrap_or(&self.fallback)
    }

    /// Cast registered under `name` (`INTEGER`, `ROWID`, `STRING`, ...).
    pub fn named(&self, name: &str) -> Option<&CastRef> {
        self.by_name.get(name)
    }

    /// Resolve and cast in one step.
    ///
    /// NULL yields [`Value::Null`] even for an unknown OID.
    pub fn cast(&self, oid: Oid, field: RawField<'_>, ctx: &CastContext) -> Result<Value> {
        if field.is_null() {
            return Ok(Value::Null);
        }
        self.resolve(oid)?.cast(field, ctx)
    }

    pub fn contains(&self, oid: Oid) -> bool {
        self.by_oid.contains_key(&oid)
    }

    /// Number of OIDs with a cast.
    pub fn len(&self) -> usize {
        self.by_oid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_oid.is_empty()
    }

    pub fn temporal_backend(&self) -> TemporalBackend {
        self.temporal_backend
    }

    pub fn decimal_support(&self) -> DecimalSupport {
        self.decimal_support
    }
}

/// Builds a [`CastTable`]. Later registrations override earlier ones.
#[derive(Debug)]
pub struct CastTableBuilder {
    by_oid: HashMap<Oid, CastRef>,
    by_name: HashMap<&'static str, CastRef>,
    fallback: CastRef,
    temporal_backend: TemporalBackend,
    decimal_support: DecimalSupport,
    text_model: TextModel,
}

impl CastTableBuilder {
    /// Builder preloaded with the built-in casts.
    pub fn new(opts: &CastOpts) -> Self {
        let decimal_support = DecimalSupport::detect(opts.decimal);
        let bytes = shared(BytesCast);
        let mut builder = Self {
            by_oid: HashMap::new(),
            by_name: HashMap::new(),
            fallback: Arc::clone(&bytes),
            temporal_backend: opts.temporal_backend,
            decimal_support,
            text_model: opts.text_model,
        };
        builder.install_builtins(&bytes);
        builder
    }

    /// Map `oids` to `cast` and make it reachable as `name`.
    pub fn register(mut self, name: &'static str, oids: &[Oid], cast: CastRef) -> Self {
        self.install(name, oids, &cast);
        self
    }

    /// Freeze the table.
    pub fn build(self) -> CastTable {
        debug!(
            backend = self.temporal_backend.name(),
            decimal = ?self.decimal_support,
            text_model = ?self.text_model,
            oids = self.by_oid.len(),
            "cast table built"
        );
        CastTable {
            by_oid: self.by_oid,
            by_name: self.by_name,
            fallback: self.fallback,
            temporal_backend: self.temporal_backend,
            decimal_support: self.decimal_support,
        }
    }

    fn install(&mut self, name: &'static str, oids: &[Oid], cast: &CastRef) {
        for &oid in oids {
            self.by_oid.insert(oid, Arc::clone(cast));
        }
        self.by_name.insert(name, Arc::clone(cast));
    }

    fn install_builtins(&mut self, bytes: &CastRef) {
        const STRING_OIDS: &[Oid] = &[
            oid::CHAR,
            oid::NAME,
            oid::TEXT,
            oid::UNKNOWN,
            oid::BPCHAR,
            oid::VARCHAR,
        ];

        let integer = shared(IntegerCast);
        let float = shared(FloatCast);
        let unicode = shared(UnicodeCast);
        let date = shared(DateCast::new(self.temporal_backend));

        self.install("INTEGER", &[oid::INT2, oid::INT4], &integer);
        self.install("LONGINTEGER", &[oid::INT8], &shared(LongIntegerCast));
        self.install("FLOAT", &[oid::FLOAT4, oid::FLOAT8], &float);
        self.install("NUMBER", &[], &float);
        self.install(
            "DECIMAL",
            &[oid::NUMERIC],
            &shared(DecimalCast::new(self.decimal_support)),
        );
        self.install("UNICODE", &[], &unicode);
        self.install("BYTES", &[], bytes);
        let string = match self.text_model {
            TextModel::Text => &unicode,
            TextModel::Bytes => bytes,
        };
        self.install("STRING", STRING_OIDS, string);
        self.install("BOOLEAN", &[oid::BOOL], &shared(BooleanCast));
        self.install("DATE", &[oid::DATE], &date);
        self.install("DATETIME", &[oid::TIMESTAMP, oid::TIMESTAMPTZ], &date);
        self.install(
            "TIME",
            &[oid::TIME, oid::TIMETZ],
            &shared(TimeCast::new(self.temporal_backend)),
        );
        self.install(
            "INTERVAL",
            &[oid::TINTERVAL, oid::INTERVAL],
            &shared(IntervalCast::new(self.temporal_backend)),
        );
        self.install("BINARY", &[oid::BYTEA], &shared(BinaryCast));
        self.install("ROWID", &[oid::OID], &integer);
    }
}

fn shared<C: Cast + 'static>(cast: C) -> CastRef {
    Arc::new(cast)
}
