//! Binary NAIF SPK (DAF) kernel reader.
pub mod daf_header;
pub mod directory;
pub mod ephemeris_record;
pub mod jpl_ephem_header;
pub mod naif_data;
pub mod naif_ids;
pub mod summary_record;
