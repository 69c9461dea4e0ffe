use crate::scan_types::{VaccinationCenter, VaccineAvailability};

/// Resolve the friendly name and owning center for a single availability
/// record. Centers are searched in directory order and the first vaccine
/// with a matching slug wins. A record matching no known vaccine is
/// returned unchanged, with an empty friendly name and no center.
pub fn resolve(
    centers: &[VaccinationCenter],
    mut record: VaccineAvailability,
) -> VaccineAvailability {
    for center in centers {
        if let Some(name) = center.vaccine_name_by_slug(&record.slug) {
            record.friendly_name = name.to_string();
            record.center = Some(center.clone());
            break;
        }
    }
    record
}

/// Resolve every record of an availability batch, preserving record order
pub fn resolve_all(
    centers: &[VaccinationCenter],
    records: Vec<VaccineAvailability>,
) -> Vec<VaccineAvailability> {
    records
        .into_iter()
        .map(|record| resolve(centers, record))
        .collect()
}
