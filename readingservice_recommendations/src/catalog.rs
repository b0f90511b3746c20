use crate::api::{CatalogKey, Genre};

#[derive(Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: CatalogKey,
    pub title: &'static str,
    pub author: &'static str,
    pub difficulty: u8,
    pub genre: Genre,
}

// Ordered by `CatalogKey` discriminant, `Catalog::entry` relies on it.
static ENTRIES: [CatalogEntry; 7] = [
    CatalogEntry {
        key: CatalogKey::TheFaultInOurStars,
        title: "The Fault in Our Stars",
        author: "John Green",
        difficulty: 1,
        genre: Genre::Romance,
    },
    CatalogEntry {
        key: CatalogKey::MeBeforeYou,
        title: "Me Before You",
        author: "Jojo Moyes",
        difficulty: 2,
        genre: Genre::Romance,
    },
    CatalogEntry {
        key: CatalogKey::ItEndsWithUs,
        title: "It Ends With Us",
        author: "Colleen Hoover",
        difficulty: 2,
        genre: Genre::Romance,
    },
    CatalogEntry {
        key: CatalogKey::TheSilentPatient,
        title: "The Silent Patient",
        author: "Alex Michaelides",
        difficulty: 2,
        genre: Genre::Thriller,
    },
    CatalogEntry {
        key: CatalogKey::GoneGirl,
        title: "Gone Girl",
        author: "Gillian Flynn",
        difficulty: 3,
        genre: Genre::Thriller,
    },
    CatalogEntry {
        key: CatalogKey::HarryPotter,
        title: "Harry Potter",
        author: "J.K. Rowling",
        difficulty: 1,
        genre: Genre::Fantasy,
    },
    CatalogEntry {
        key: CatalogKey::TheHobbit,
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        difficulty: 2,
        genre: Genre::Fantasy,
    },
];

/// Fixed seed set of recommendable books
pub struct Catalog;

impl Catalog {
    /// All entries, always in the same order
    pub fn all() -> &'static [CatalogEntry] {
        &ENTRIES
    }

    pub fn entry(key: CatalogKey) -> &'static CatalogEntry {
        &ENTRIES[key as usize]
    }

    pub fn find_by_title(title: &str) -> Option<&'static CatalogEntry> {
        ENTRIES.iter().find(|entry| entry.title == title)
    }
}
