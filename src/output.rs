use std::sync::Arc;
use tokio::sync::RwLock;

/// The region of the page showing the last rendered result.
///
/// Clones share the same region. Every render replaces the previous content.
#[derive(Clone, Debug, Default)]
pub struct OutputArea {
    content: Arc<RwLock<String>>,
}

impl OutputArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn render(&self, text: impl Into<String>) {
        *self.content.write().await = text.into();
    }

    /// Render only if `still_wanted` holds once the region is locked for writing
    pub async fn render_if(
        &self,
        text: impl Into<String>,
        still_wanted: impl FnOnce() -> bool,
    ) -> bool {
        let mut content = self.content.write().await;
        if still_wanted() {
            *content = text.into();
            true
        } else {
            false
        }
    }

    pub async fn content(&self) -> String {
        self.content.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_blank() {
        assert_eq!(OutputArea::new().content().await, "");
    }

    #[tokio::test]
    async fn render_overwrites_and_is_shared_between_clones() {
        let area = OutputArea::new();
        let handle = area.clone();

        area.render("first").await;
        handle.render("second").await;

        assert_eq!(area.content().await, "second");
    }

    #[tokio::test]
    async fn render_if_keeps_content_when_no_longer_wanted() {
        let area = OutputArea::new();
        area.render("kept").await;

        assert!(!area.render_if("dropped", || false).await);
        assert_eq!(area.content().await, "kept");

        assert!(area.render_if("replaced", || true).await);
        assert_eq!(area.content().await, "replaced");
    }
}
