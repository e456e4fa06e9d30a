//! The built-in storefront catalog.

use rust_decimal::Decimal;

use super::run::CatalogDefinition;
use super::seeder::CatalogItem;
use super::taxonomy::{ChildDefinition, RootDefinition};

/// Root, six child categories and fifty listings with fixed prices in roubles.
#[must_use]
pub fn builtin_catalog() -> CatalogDefinition {
    CatalogDefinition {
        root: RootDefinition {
            name: "All products".to_owned(),
            slug: "all".to_owned(),
            description: "All product categories".to_owned(),
        },
        children: vec![
            ChildDefinition::new("software", "Software"),
            ChildDefinition::new("ebooks", "E-books"),
            ChildDefinition::new("courses", "Online courses"),
            ChildDefinition::new("music", "Music"),
            ChildDefinition::new("templates", "Templates"),
            ChildDefinition::new("assets", "Assets"),
        ],
        items: builtin_items(),
    }
}

fn item(title: &str, slug: &str, roubles: i64, description: &str) -> CatalogItem {
    CatalogItem::new(title, slug, Decimal::new(roubles * 100, 2), description)
}

#[allow(clippy::too_many_lines)]
fn builtin_items() -> Vec<CatalogItem> {
    vec![
        // Software
        item(
            "Office Suite Pro 2024",
            "software",
            6990,
            "Complete office suite for home and business. Includes a word processor, spreadsheets and presentations.",
        ),
        item(
            "PhotoEditor AI",
            "software",
            12990,
            "AI-powered photo editor with automatic enhancement and retouching.",
        ),
        item(
            "VideoStudio Ultimate",
            "software",
            17990,
            "Professional video editor with effects and transitions.",
        ),
        item(
            "Antivirus Security",
            "software",
            3990,
            "Protection against viruses and malware with daily signature updates.",
        ),
        item(
            "CodeEditor Pro",
            "software",
            5990,
            "Advanced code editor for developers with support for every major language.",
        ),
        item(
            "3D Modeler",
            "software",
            22990,
            "3D modelling and animation software.",
        ),
        item(
            "AudioMaster Studio",
            "software",
            14990,
            "Professional studio for sound recording and processing.",
        ),
        item(
            "Database Manager",
            "software",
            8990,
            "Management tool for SQL and NoSQL databases.",
        ),
        item(
            "Network Scanner",
            "software",
            4990,
            "Analysis and monitoring of computer networks.",
        ),
        item(
            "Backup System",
            "software",
            2990,
            "Automatic data backup.",
        ),
        // E-books
        item(
            "Python Programming Guide",
            "ebooks",
            1490,
            "Complete guide to programming in Python, from the basics to advanced topics.",
        ),
        item(
            "Web Development Handbook",
            "ebooks",
            1990,
            "Modern web development: HTML, CSS, JavaScript and React.",
        ),
        item(
            "Data Science Fundamentals",
            "ebooks",
            1790,
            "Foundations of data analysis and machine learning.",
        ),
        item(
            "Business Strategy 2024",
            "ebooks",
            2490,
            "Growth strategies for businesses in the digital age.",
        ),
        item(
            "Digital Marketing Mastery",
            "ebooks",
            1690,
            "Effective marketing on social networks and the web.",
        ),
        item(
            "UI/UX Design Principles",
            "ebooks",
            1890,
            "Principles of user interface design.",
        ),
        item(
            "Cybersecurity Basics",
            "ebooks",
            1590,
            "Foundations of information security.",
        ),
        item(
            "Mobile App Development",
            "ebooks",
            2090,
            "Building mobile applications for iOS and Android.",
        ),
        item(
            "Cloud Computing Guide",
            "ebooks",
            1790,
            "Working with AWS and Azure cloud platforms.",
        ),
        item(
            "DevOps Practices",
            "ebooks",
            1990,
            "Modern development and operations practices.",
        ),
        // Online courses
        item(
            "Full Stack Web Developer",
            "courses",
            49990,
            "Complete web development course, from HTML to React and Node.js.",
        ),
        item(
            "Data Science Professional",
            "courses",
            59990,
            "Professional course in data analysis and machine learning.",
        ),
        item(
            "UI/UX Design Bootcamp",
            "courses",
            44990,
            "Intensive course in user interface design.",
        ),
        item(
            "Digital Marketing Expert",
            "courses",
            39990,
            "Comprehensive digital marketing course.",
        ),
        item(
            "Mobile Development Pro",
            "courses",
            54990,
            "Native and cross-platform mobile application development.",
        ),
        item(
            "Cybersecurity Specialist",
            "courses",
            64990,
            "Training for information security specialists.",
        ),
        item(
            "Cloud Architecture",
            "courses",
            52990,
            "Designing and deploying cloud solutions.",
        ),
        item(
            "DevOps Engineering",
            "courses",
            57990,
            "Automating development and operations workflows.",
        ),
        item(
            "Game Development",
            "courses",
            47990,
            "Building games with Unity and Unreal Engine.",
        ),
        item(
            "AI & Machine Learning",
            "courses",
            69990,
            "Advanced course in artificial intelligence.",
        ),
        // Music
        item(
            "Electronic Vibes Collection",
            "music",
            1490,
            "Electronic tracks for videos and projects.",
        ),
        item(
            "Relaxation & Meditation",
            "music",
            990,
            "Calm music for meditation and rest.",
        ),
        item(
            "Cinematic Soundtracks",
            "music",
            1990,
            "Epic soundtracks for videos and presentations.",
        ),
        item(
            "Jazz Classics",
            "music",
            1290,
            "Classic jazz pieces in a modern arrangement.",
        ),
        item(
            "Ambient Nature Sounds",
            "music",
            790,
            "Sounds of nature: forest, ocean, rain.",
        ),
        item(
            "Rock Collection 2024",
            "music",
            1690,
            "A selection of contemporary rock tracks.",
        ),
        item(
            "Sound Effects Library",
            "music",
            2990,
            "Library of sound effects for video and games.",
        ),
        item(
            "Classical Masterpieces",
            "music",
            1390,
            "Masterpieces of classical music.",
        ),
        item(
            "Lo-Fi Beats",
            "music",
            1190,
            "Relaxed lo-fi tracks for work and study.",
        ),
        item(
            "World Music Collection",
            "music",
            1590,
            "Music from many peoples and cultures.",
        ),
        // Templates
        item(
            "Corporate Website Template",
            "templates",
            7990,
            "Ready-made corporate website template built on Bootstrap 5.",
        ),
        item(
            "E-commerce Store Template",
            "templates",
            11990,
            "Online store template with a cart and a catalog.",
        ),
        item(
            "Portfolio for Creatives",
            "templates",
            4990,
            "Elegant portfolio template for designers and photographers.",
        ),
        item(
            "Landing Page Builder",
            "templates",
            3990,
            "Landing page builder with a drag-and-drop interface.",
        ),
        item(
            "Admin Dashboard Template",
            "templates",
            8990,
            "Admin panel template with charts and tables.",
        ),
        // Assets
        item(
            "UI Kit - Modern Design",
            "assets",
            5990,
            "Set of UI components in a modern style.",
        ),
        item(
            "Icon Pack - 1000+ Icons",
            "assets",
            2990,
            "More than 1000 vector icons.",
        ),
        item(
            "Font Collection - Pro",
            "assets",
            4990,
            "Professional fonts licensed for commercial use.",
        ),
        item(
            "Texture Pack - 4K",
            "assets",
            3990,
            "High-resolution textures for design work.",
        ),
        item(
            "3D Models - Premium",
            "assets",
            9990,
            "3D models for games and visualisation.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.children.len(), 6);
        assert_eq!(catalog.items.len(), 50);

        let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
        for item in &catalog.items {
            *per_category.entry(item.category_slug.as_str()).or_insert(0) += 1;
        }
        assert_eq!(per_category.get("software"), Some(&10));
        assert_eq!(per_category.get("templates"), Some(&5));
        assert_eq!(per_category.get("assets"), Some(&5));
    }

    #[test]
    fn test_builtin_items_reference_known_categories() {
        let catalog = builtin_catalog();
        let slugs: HashSet<&str> = catalog.children.iter().map(|c| c.slug.as_str()).collect();
        assert!(
            catalog
                .items
                .iter()
                .all(|item| slugs.contains(item.category_slug.as_str()))
        );
        assert!(!slugs.contains(catalog.root.slug.as_str()));
    }

    #[test]
    fn test_builtin_prices_are_positive() {
        let catalog = builtin_catalog();
        assert!(catalog.items.iter().all(|item| item.price > Decimal::ZERO));
        assert_eq!(
            catalog.items.first().map(|item| item.price),
            Some(Decimal::new(6990, 0))
        );
    }
}
