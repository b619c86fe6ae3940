pub mod compare_publishers;
pub mod scan_images;

pub use compare_publishers::ComparePublishersUseCase;
pub use scan_images::ScanImagesUseCase;
