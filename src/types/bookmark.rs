use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a saved bookmark card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    pub thumbnail_image: String,
    pub date_added: NaiveDate,
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A candidate bookmark produced by the form, before the store shapes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkDraft {
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub thumbnail_image: String,
}

/// Metadata extracted from a page for form auto-fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail_image: String,
}

struct SeedRow {
    title: &'static str,
    url: &'static str,
    description: &'static str,
    thumbnail: &'static str,
    category: &'static str,
    date: (i32, u32, u32),
    likes: u64,
    source: &'static str,
}

const SEED: [SeedRow; 6] = [
    SeedRow {
        title: "10 Productivity Hacks You Should Try Today",
        url: "https://example.com/productivity",
        description: "Boost your productivity with these science-backed techniques",
        thumbnail: "https://images.unsplash.com/photo-1499750310107-5fef28a66643?auto=format&fit=crop&w=1170&q=80",
        category: "selfhelp",
        date: (2023, 10, 15),
        likes: 423,
        source: "Medium",
    },
    SeedRow {
        title: "Investing for Beginners: Where to Start",
        url: "https://example.com/investing-basics",
        description: "Learn the fundamentals of investing with this comprehensive guide",
        thumbnail: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?auto=format&fit=crop&w=1170&q=80",
        category: "finance",
        date: (2023, 10, 12),
        likes: 287,
        source: "Forbes",
    },
    SeedRow {
        title: "Learning React Hooks: A Comprehensive Guide",
        url: "https://example.com/react-hooks",
        description: "Master React hooks with this step-by-step tutorial",
        thumbnail: "https://images.unsplash.com/photo-1587620962725-abab7fe55159?auto=format&fit=crop&w=1170&q=80",
        category: "coding",
        date: (2023, 10, 10),
        likes: 512,
        source: "Dev.to",
    },
    SeedRow {
        title: "Hidden Gems: Tokyo's Best Kept Secrets",
        url: "https://example.com/tokyo-travel",
        description: "Discover the hidden spots that most tourists miss in Tokyo",
        thumbnail: "https://images.unsplash.com/photo-1536098561742-ca998e48cbcc?auto=format&fit=crop&w=1036&q=80",
        category: "travel",
        date: (2023, 10, 8),
        likes: 356,
        source: "Lonely Planet",
    },
    SeedRow {
        title: "Advanced CSS Animation Techniques",
        url: "https://example.com/css-animations",
        description: "Take your web designs to the next level with these animation techniques",
        thumbnail: "https://images.unsplash.com/photo-1621839673705-6617adf9e890?auto=format&fit=crop&w=1332&q=80",
        category: "design",
        date: (2023, 10, 5),
        likes: 198,
        source: "CSS-Tricks",
    },
    SeedRow {
        title: "Mindfulness Meditation: A Beginner's Guide",
        url: "https://example.com/mindfulness",
        description: "Start your meditation practice with these beginner-friendly techniques",
        thumbnail: "https://images.unsplash.com/photo-1506126613408-eca07ce68773?auto=format&fit=crop&w=1170&q=80",
        category: "selfhelp",
        date: (2023, 10, 2),
        likes: 432,
        source: "Headspace",
    },
];

/// Returns the featured bookmarks the vault starts with, ids 1 through 6.
pub fn seed_bookmarks() -> Vec<Bookmark> {
    SEED.iter()
        .enumerate()
        .map(|(i, row)| {
            let (y, m, d) = row.date;
            Bookmark {
                id: i as u64 + 1,
                title: row.title.to_string(),
                url: row.url.to_string(),
                description: row.description.to_string(),
                category: row.category.to_string(),
                thumbnail_image: row.thumbnail.to_string(),
                date_added: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                likes: row.likes,
                source: Some(row.source.to_string()),
            }
        })
        .collect()
}
