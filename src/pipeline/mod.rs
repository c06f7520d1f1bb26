pub mod ingest;
pub mod extraction;
pub mod segmentation;
pub mod classify;
pub mod report;
pub mod cancel;
pub mod processor; // gate → extract → segment → classify → report

#[cfg(test)]
pub(crate) mod test_support;
