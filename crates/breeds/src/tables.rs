//! Built-in breed tables.
//!
//! Entries are written as people type them; the taxonomy folds case and
//! diacritics when it is built.

/// Canonical English breed key and the names it is also known by.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("golden retriever", &["golden", "cobrador dorado", "perro amarillo", "retriever"]),
    ("german shepherd", &["pastor aleman", "pastor alemán", "alsatian", "pastor"]),
    ("labrador retriever", &["labrador", "lab", "perro cobrador", "retriever"]),
    ("beagle", &["beagle", "perro sabueso"]),
    ("poodle", &["poodle", "caniche", "perro lanudo"]),
    ("chihuahua", &["chihuahua", "chihuahueño", "perro pequeño"]),
    ("pug", &["pug", "carlino", "mops"]),
    ("bulldog", &["bulldog", "bull dog"]),
    ("french bulldog", &["bulldog frances", "bulldog francés", "frenchie"]),
    ("husky", &["husky", "siberiano", "perro de nieve", "malamute"]),
    ("boxer", &["boxer", "bóxer"]),
    ("dalmatian", &["dalmata", "dálmata", "perro manchado"]),
    ("rottweiler", &["rottie", "rottweiler"]),
    ("pit bull", &["pitbull", "pit bull terrier", "staffordshire"]),
    ("schnauzer", &["schnauzer", "perro con barba"]),
    ("cocker spaniel", &["cocker", "spaniel"]),
    ("shih tzu", &["shih tzu", "shitzu"]),
    ("doberman", &["doberman", "dóberman"]),
    ("great dane", &["gran danes", "gran danés"]),
    ("border collie", &["border collie", "collie"]),
    ("pomeranian", &["pomerania", "pomeranian"]),
    ("maltese", &["maltes", "maltés"]),
    ("yorkshire terrier", &["yorkie", "yorkshire"]),
    ("dachshund", &["salchicha", "dachshund", "teckel"]),
    ("mixed breed", &["criollo", "mezcla", "mestizo", "sin raza"]),
    ("saint bernard", &["san bernardo", "st. bernard"]),
];

/// Breeds a classifier tends to confuse with one another.
pub const FAMILIES: &[(&str, &[&str])] = &[
    ("retriever", &["golden retriever", "labrador retriever", "flat-coated retriever"]),
    ("shepherd", &["german shepherd", "belgian malinois", "border collie"]),
    ("terrier", &["pit bull", "staffordshire bull terrier", "bull terrier", "american bully"]),
    ("spitz", &["husky", "alaskan malamute", "samoyed", "pomeranian"]),
    ("small_lap", &["shih tzu", "maltese", "poodle", "bichon frise"]),
];
