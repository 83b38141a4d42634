//! Built-in sample library used when no item file is given.

use medialib_core::{FileSystemItem, ItemStore};

/// A small agency media library: brand assets, campaigns, and documents.
pub fn demo_items() -> Vec<FileSystemItem> {
    vec![
        FileSystemItem::folder("brand", "Brand Assets").with_modified("2024-02-10"),
        FileSystemItem::folder("campaigns", "Campaigns").with_modified("2024-03-02"),
        FileSystemItem::folder("docs", "Documents").with_modified("2024-01-20"),
        FileSystemItem::image("hero", "hero-banner.png")
            .with_size(1_842_000)
            .with_modified("2024-03-05")
            .with_url("https://cdn.example.com/hero-banner.png"),
        FileSystemItem::file("notes", "notes.txt")
            .with_size(2_300)
            .with_modified("2024-03-06"),
        FileSystemItem::folder("logos", "Logos")
            .with_parent("brand")
            .with_modified("2024-02-10"),
        FileSystemItem::image("logo-dark", "logo-dark.svg")
            .with_parent("logos")
            .with_size(14_200)
            .with_modified("2024-02-09"),
        FileSystemItem::image("logo-light", "logo-light.svg")
            .with_parent("logos")
            .with_size(14_050)
            .with_modified("2024-02-09"),
        FileSystemItem::file("guidelines", "brand-guidelines.pdf")
            .with_parent("brand")
            .with_size(5_400_000)
            .with_modified("2024-01-30"),
        FileSystemItem::image("palette", "palette.png")
            .with_parent("brand")
            .with_size(220_000)
            .with_modified("2024-02-01"),
        FileSystemItem::folder("spring", "Spring Launch")
            .with_parent("campaigns")
            .with_modified("2024-03-01"),
        FileSystemItem::folder("summer", "Summer Sale")
            .with_parent("campaigns")
            .with_modified("2024-03-02"),
        FileSystemItem::image("spring-ad", "spring-ad-1080.jpg")
            .with_parent("spring")
            .with_size(640_000)
            .with_modified("2024-02-28"),
        FileSystemItem::image("spring-story", "spring-story.jpg")
            .with_parent("spring")
            .with_size(512_000)
            .with_modified("2024-02-28"),
        FileSystemItem::file("spring-brief", "brief.docx")
            .with_parent("spring")
            .with_size(48_000)
            .with_modified("2024-02-20"),
        FileSystemItem::file("summer-plan", "media-plan.xlsx")
            .with_parent("summer")
            .with_size(96_000)
            .with_modified("2024-03-02"),
        FileSystemItem::file("contract", "client-contract.pdf")
            .with_parent("docs")
            .with_size(310_000)
            .with_modified("2024-01-18"),
        FileSystemItem::file("invoice", "invoice-0042.pdf")
            .with_parent("docs")
            .with_size(88_000)
            .with_modified("2024-01-20"),
    ]
}

/// The demo library as a store.
pub fn demo_store() -> anyhow::Result<ItemStore> {
    Ok(ItemStore::new(demo_items())?)
}
