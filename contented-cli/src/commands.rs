//! Subcommand implementations

use std::sync::Arc;

use anyhow::{bail, Result};
use contented_client::{ContentedClient, Content};
use contented_core::types::{Container, ContainerSearch, ContentSearch, Screen, Tag, TagQuery};
use contented_core::{BrowseState, ContainerService, CoreError, LoaderService, ServiceContext};

use crate::config::ViewConfig;

/// Everything a subcommand needs.
pub struct App {
    pub client: ContentedClient,
    pub ctx: Arc<ServiceContext>,
}

impl App {
    pub fn new(client: ContentedClient) -> Self {
        let config = client.config().clone();
        let ctx = Arc::new(ServiceContext::new(Arc::new(client.clone()), config));
        Self { client, ctx }
    }

    /// `containers`: one line per container.
    pub async fn containers(&self, page: usize, per_page: Option<usize>) -> Result<()> {
        let service = ContainerService::new(Arc::clone(&self.ctx));
        let response = service.list_containers(Some(page), per_page).await?;

        for container in &response.results {
            println!("{}", container_line(container));
        }
        println!("{} of {} containers", response.results.len(), response.total);
        Ok(())
    }

    /// `load`: load a container fully, then print the window around `anchor`.
    pub async fn load(
        &self,
        container_id: &str,
        anchor: Option<&str>,
        view: ViewConfig,
        page_size: Option<usize>,
    ) -> Result<()> {
        let containers = ContainerService::new(Arc::clone(&self.ctx));
        let loader = LoaderService::new(Arc::clone(&self.ctx));

        let mut container = containers.get_container(container_id).await?;
        match loader.full_load_dir(&mut container, page_size).await {
            Ok(report) => tracing::info!(
                "{} requests, {} new items, {} of {} loaded",
                report.requests,
                report.added,
                container.count(),
                container.total()
            ),
            // Show what is loaded; the server listing changed under us.
            Err(e @ CoreError::StaleContainer { .. }) => tracing::warn!("{e}"),
            Err(e) => return Err(e.into()),
        }

        let mut browse = BrowseState::new(vec![container], self.ctx.nav.clone());
        browse.select_container(0);
        if let Some(anchor_id) = anchor {
            let anchor_item = Content::new(anchor_id, 0);
            if !browse.select_content(&anchor_item) {
                bail!("Content {anchor_id} is not in container {container_id}");
            }
        }

        let Some(container) = browse.current_container() else {
            return Ok(());
        };
        let current = container.current_content();
        println!("{}", container_line(container));
        for item in container.interval_around(current, view.visible, view.before) {
            let marker = if current.is_some_and(|c| c.id == item.id) {
                ">"
            } else {
                " "
            };
            println!("{marker} {}", content_line(item));
        }
        Ok(())
    }

    /// `search`: content search, optionally limited to one container.
    pub async fn search(&self, query: &ContentSearch) -> Result<()> {
        let service = ContainerService::new(Arc::clone(&self.ctx));
        let response = service.search_contents(query).await?;

        for item in &response.results {
            println!("{}", content_line(item));
        }
        println!("{} of {} matches", response.results.len(), response.total);
        Ok(())
    }

    /// `search-containers`: container search by name or text.
    pub async fn search_containers(&self, query: &ContainerSearch) -> Result<()> {
        let service = ContainerService::new(Arc::clone(&self.ctx));
        let response = service.search_containers(query).await?;

        for container in &response.results {
            println!("{}", container_line(container));
        }
        println!("{} of {} containers", response.results.len(), response.total);
        Ok(())
    }

    /// `show`: details and links for one item.
    pub async fn show(&self, content_id: &str) -> Result<()> {
        let service = ContainerService::new(Arc::clone(&self.ctx));
        let content = service.get_content(content_id).await?;

        println!("{}", content_line(&content));
        println!("  container: {}", content.container_id);
        println!("  type:      {}", content.content_type);
        println!("  size:      {} bytes", content.size);
        if !content.tags.is_empty() {
            let tags: Vec<&str> = content.tags.iter().map(|t| t.id.as_str()).collect();
            println!("  tags:      {}", tags.join(", "));
        }
        if let Some(info) = content.video_info() {
            println!(
                "  video:     {} {} {}s{}",
                info.video_codec_name(),
                info.resolution(),
                info.duration_secs().unwrap_or(0),
                if info.can_encode() { "" } else { " (already hevc)" }
            );
        }
        if content.is_video() {
            let screens = service.list_screens(content_id).await?;
            println!("  screens:   {}", screens.total);
            for screen in &screens.results {
                println!("    {}", screen_line(screen));
            }
        }
        match content.typed_preview_icon() {
            Some(icon) => println!("  preview:   [{icon}]"),
            None => println!("  preview:   {}", self.client.preview_url(&content)),
        }
        println!("  view:      {}", self.client.view_url(&content));
        println!("  download:  {}", self.client.download_url(&content));
        if content.is_text() {
            let text = service.get_text_content(content_id).await?;
            println!();
            println!("{text}");
        }
        Ok(())
    }

    /// `tags`: every tag, optionally of one type.
    pub async fn tags(&self, query: &TagQuery) -> Result<()> {
        let service = ContainerService::new(Arc::clone(&self.ctx));
        let response = service.list_tags(query).await?;

        for tag in &response.results {
            println!("{}", tag_line(tag));
        }
        println!("{} of {} tags", response.results.len(), response.total);
        Ok(())
    }
}

fn container_line(container: &Container) -> String {
    format!(
        "[{}] {} ({}/{}, {:?})",
        container.id,
        container.name,
        container.count(),
        container.total(),
        container.load_state()
    )
}

fn content_line(item: &Content) -> String {
    let name = if item.description.is_empty() {
        &item.src
    } else {
        &item.description
    };
    format!("{:>6} {} {}", item.idx, item.id, name)
}

fn screen_line(screen: &Screen) -> String {
    format!("{:>3} {} ({} bytes)", screen.idx, screen.src, screen.size)
}

fn tag_line(tag: &Tag) -> String {
    let mut parts = vec![tag.id.clone()];
    if !tag.tag_type.is_empty() {
        parts.push(format!("[{}]", tag.tag_type));
    }
    if !tag.description.is_empty() {
        parts.push(tag.description.clone());
    }
    if tag.is_problem() {
        parts.push("(problem)".to_string());
    }
    parts.join(" ")
}
