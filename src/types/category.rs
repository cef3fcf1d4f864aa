use serde::{Deserialize, Serialize};

/// Sentinel category id meaning "no filter".
pub const ALL_CATEGORY_ID: &str = "all";

/// Closed set of icons a category can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryIcon {
    BookOpen,
    HeartHandshake,
    DollarSign,
    GraduationCap,
    Video,
    Plane,
    PenTool,
    Code,
}

impl CategoryIcon {
    /// Asset name the presentation layer renders for this icon.
    pub fn asset_name(&self) -> &'static str {
        match self {
            CategoryIcon::BookOpen => "book-open",
            CategoryIcon::HeartHandshake => "heart-handshake",
            CategoryIcon::DollarSign => "dollar-sign",
            CategoryIcon::GraduationCap => "graduation-cap",
            CategoryIcon::Video => "video",
            CategoryIcon::Plane => "plane",
            CategoryIcon::PenTool => "pen-tool",
            CategoryIcon::Code => "code",
        }
    }
}

/// A named tag used to filter bookmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: CategoryIcon,
    pub active: bool,
}

impl Category {
    pub fn new(id: &str, name: &str, icon: CategoryIcon) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon,
            active: false,
        }
    }

    /// Whether this is the "all" sentinel rather than a real category.
    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORY_ID
    }

    /// Returns the seeded category list, with "all" first and active.
    pub fn defaults() -> Vec<Category> {
        let mut categories = vec![
            Category::new(ALL_CATEGORY_ID, "All", CategoryIcon::BookOpen),
            Category::new("selfhelp", "Self Help", CategoryIcon::HeartHandshake),
            Category::new("finance", "Finance", CategoryIcon::DollarSign),
            Category::new("tutorials", "Tutorials", CategoryIcon::GraduationCap),
            Category::new("videos", "Videos", CategoryIcon::Video),
            Category::new("travel", "Travel", CategoryIcon::Plane),
            Category::new("design", "Design", CategoryIcon::PenTool),
            Category::new("coding", "Coding", CategoryIcon::Code),
        ];
        categories[0].active = true;
        categories
    }
}
