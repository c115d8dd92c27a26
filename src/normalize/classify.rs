use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::network::{
    CableSegment, ConstructionStatus, DistributionPoint, NetworkSnapshot, Pole, path_length_m,
};

use super::fields::{FieldExtractor, FieldKey, get, parse_length_m};
use super::record::RawPlacemark;

/// One typed network entity produced from a raw placemark record. The three
/// kinds have disjoint required fields, so this is a closed enum rather than
/// a loose map.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Pole(Pole),
    DistributionPoint(DistributionPoint),
    CableSegment(CableSegment),
}

/// Record that could not be normalized, with the reason it was skipped.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub name: String,
    pub reason: String,
}

/// Batch normalization output: the snapshot plus every skipped record, so
/// source-data problems stay visible instead of being silently dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizeReport {
    pub snapshot: NetworkSnapshot,
    pub skipped: Vec<SkippedRecord>,
}

const POLE_VOCAB: &[&str] = &["pole", "tiang", "pu-"];
const ODP_VOCAB: &[&str] = &["odp", "optical distribution", "splice"];

/// Converts raw placemark records into typed network entities. Pure and
/// deterministic; identical input always yields the identical entity.
pub struct Normalizer {
    fields: FieldExtractor,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self { fields: FieldExtractor::new() }
    }

    /// Normalize a single record into exactly one typed entity.
    ///
    /// Multi-point geometry is a cable run. Single-point geometry is
    /// classified by vocabulary: pole terms or a Designator key make a Pole,
    /// ODP/splice terms make a DistributionPoint. Records with no geometry
    /// or no matching vocabulary fail with [`Error::Parse`].
    pub fn normalize(&self, record: &RawPlacemark) -> Result<Entity> {
        if record.coordinates.is_empty() {
            return Err(Error::Parse("record has no geometry".into()));
        }

        let fields = self.fields.extract(&record.description);
        if record.coordinates.len() >= 2 {
            return Ok(Entity::CableSegment(self.cable(record, &fields)));
        }

        let text = format!(
            "{} {}",
            record.name.to_ascii_lowercase(),
            record.description.to_ascii_lowercase()
        );
        let mentions = |vocab: &[&str]| vocab.iter().any(|term| text.contains(term));

        if mentions(POLE_VOCAB) || get(&fields, FieldKey::Designator).is_some() {
            Ok(Entity::Pole(self.pole(record, &fields)))
        } else if mentions(ODP_VOCAB) {
            Ok(Entity::DistributionPoint(self.odp(record, &fields)))
        } else {
            Err(Error::Parse("record matches no known entity vocabulary".into()))
        }
    }

    /// Normalize a batch of records into a snapshot, skipping (and
    /// reporting) records that fail rather than aborting the file.
    pub fn normalize_all<'a, I>(&self, records: I) -> NormalizeReport
    where
        I: IntoIterator<Item = &'a RawPlacemark>,
    {
        let mut snapshot = NetworkSnapshot::default();
        let mut skipped = Vec::new();

        for record in records {
            match self.normalize(record) {
                Ok(Entity::Pole(pole)) => snapshot.poles.push(pole),
                Ok(Entity::DistributionPoint(odp)) => snapshot.odps.push(odp),
                Ok(Entity::CableSegment(cable)) => snapshot.cables.push(cable),
                Err(err) => {
                    debug!(record = %record.name, %err, "skipping record");
                    skipped
                        .push(SkippedRecord { name: record.name.clone(), reason: err.to_string() });
                }
            }
        }

        info!(
            poles = snapshot.poles.len(),
            odps = snapshot.odps.len(),
            cables = snapshot.cables.len(),
            skipped = skipped.len(),
            "normalized placemark records"
        );
        NormalizeReport { snapshot, skipped }
    }

    fn pole(&self, record: &RawPlacemark, fields: &[(FieldKey, &str)]) -> Pole {
        Pole {
            name: record.name.clone(),
            designator: get(fields, FieldKey::Designator)
                .map(str::to_owned)
                .unwrap_or_else(|| record.name.clone()),
            construction_status: status(fields),
            material_type: get(fields, FieldKey::MaterialType).unwrap_or("Unknown").to_owned(),
            usage: get(fields, FieldKey::Usage).unwrap_or("Telco").to_owned(),
            coordinate: record.coordinates[0],
        }
    }

    fn odp(&self, record: &RawPlacemark, fields: &[(FieldKey, &str)]) -> DistributionPoint {
        DistributionPoint {
            name: record.name.clone(),
            specification: get(fields, FieldKey::Specification).unwrap_or("Unknown").to_owned(),
            splice_type: get(fields, FieldKey::SpliceType).unwrap_or("Unknown").to_owned(),
            construction_status: status(fields),
            coordinate: record.coordinates[0],
        }
    }

    fn cable(&self, record: &RawPlacemark, fields: &[(FieldKey, &str)]) -> CableSegment {
        let route = record.coordinates.clone();
        // Surveyed length wins; otherwise fall back to the route geometry.
        let fiber_length_m = get(fields, FieldKey::FiberLength)
            .and_then(parse_length_m)
            .filter(|len| *len >= 0.0)
            .unwrap_or_else(|| path_length_m(&route));

        CableSegment {
            name: record.name.clone(),
            specification: get(fields, FieldKey::Specification).unwrap_or("Unknown").to_owned(),
            number_of_cores: get(fields, FieldKey::NumberOfCores)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|cores| *cores >= 1)
                .unwrap_or(1),
            fiber_length_m,
            construction_status: status(fields),
            route,
        }
    }
}

fn status(fields: &[(FieldKey, &str)]) -> ConstructionStatus {
    get(fields, FieldKey::ConstructionStatus)
        .map(ConstructionStatus::parse)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Coordinate;

    fn at() -> Coordinate {
        Coordinate::new(106.80, -6.20).unwrap()
    }

    fn route() -> Vec<Coordinate> {
        vec![at(), Coordinate::new(106.82, -6.20).unwrap()]
    }

    #[test]
    fn classifies_pole_by_vocabulary() {
        let record = RawPlacemark::point(
            "PU-S7-001",
            "Designator: PU-S7\nConstruction Status: In Service\nMaterial Type: Concrete",
            at(),
        );
        let entity = Normalizer::new().normalize(&record).unwrap();
        let Entity::Pole(pole) = entity else { panic!("expected pole, got {entity:?}") };
        assert_eq!(pole.designator, "PU-S7");
        assert_eq!(pole.construction_status, ConstructionStatus::InService);
        assert_eq!(pole.material_type, "Concrete");
        assert_eq!(pole.usage, "Telco"); // default
    }

    #[test]
    fn classifies_pole_by_designator_key_alone() {
        let record = RawPlacemark::point("X-17", "Designator: D-17", at());
        assert!(matches!(Normalizer::new().normalize(&record), Ok(Entity::Pole(_))));
    }

    #[test]
    fn classifies_odp_by_vocabulary() {
        let record = RawPlacemark::point(
            "ODP-FA-01",
            "Specification ID: ODP-PB-8\nSplice Type: Fusion\nConstruction Status: Planned",
            at(),
        );
        let entity = Normalizer::new().normalize(&record).unwrap();
        let Entity::DistributionPoint(odp) = entity else { panic!("expected odp") };
        assert_eq!(odp.specification, "ODP-PB-8");
        assert_eq!(odp.splice_type, "Fusion");
        assert_eq!(odp.construction_status, ConstructionStatus::Planned);
    }

    #[test]
    fn multi_point_geometry_is_always_a_cable() {
        let record = RawPlacemark::path(
            "FA-01",
            "Specification: ADSS 24C\nNumber of Core: 24\nFiber Length: 5000 m",
            route(),
        );
        let entity = Normalizer::new().normalize(&record).unwrap();
        let Entity::CableSegment(cable) = entity else { panic!("expected cable") };
        assert_eq!(cable.number_of_cores, 24);
        assert_eq!(cable.fiber_length_m, 5000.0);
        assert_eq!(cable.construction_status, ConstructionStatus::Unknown); // default
    }

    #[test]
    fn cable_length_falls_back_to_route_geometry() {
        let record = RawPlacemark::path("FA-02", "Specification: ADSS 12C", route());
        let Entity::CableSegment(cable) = Normalizer::new().normalize(&record).unwrap() else {
            panic!("expected cable")
        };
        let expected = path_length_m(&route());
        assert!(cable.fiber_length_m > 0.0);
        assert_eq!(cable.fiber_length_m, expected);
    }

    #[test]
    fn missing_geometry_is_a_parse_error() {
        let record = RawPlacemark { name: "FA-03".into(), ..Default::default() };
        assert!(matches!(Normalizer::new().normalize(&record), Err(Error::Parse(_))));
    }

    #[test]
    fn unclassifiable_record_is_a_parse_error() {
        let record = RawPlacemark::point("Landmark", "Just a note", at());
        assert!(matches!(Normalizer::new().normalize(&record), Err(Error::Parse(_))));
    }

    #[test]
    fn normalize_is_deterministic() {
        let record = RawPlacemark::point("PU-01", "Designator: A\nUsage: Telco", at());
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize(&record).unwrap(), normalizer.normalize(&record).unwrap());
    }

    #[test]
    fn batch_skips_and_reports_bad_records() {
        let records = vec![
            RawPlacemark::point("PU-01", "Designator: PU-01", at()),
            RawPlacemark::point("mystery", "no keys at all", at()),
            RawPlacemark::path("FA-01", "Fiber Length: 1.2 km", route()),
            RawPlacemark { name: "empty".into(), ..Default::default() },
        ];
        let report = Normalizer::new().normalize_all(&records);
        assert_eq!(report.snapshot.poles.len(), 1);
        assert_eq!(report.snapshot.cables.len(), 1);
        assert_eq!(report.snapshot.cables[0].fiber_length_m, 1200.0);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].name, "mystery");
        assert_eq!(report.skipped[1].name, "empty");
    }
}
