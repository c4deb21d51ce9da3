// Page generation from base/header/navigation/footer templates

use crate::depth::relative_prefix;
use crate::error::{FixError, Result};
use crate::navigation::ROUTES;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const BASE_TEMPLATE: &str = "base-template.html";
pub const HEADER_TEMPLATE: &str = "header.html";
pub const NAVIGATION_TEMPLATE: &str = "navigation.html";
pub const FOOTER_TEMPLATE: &str = "footer.html";

/// Navigation entries that can be highlighted, with their variable names.
const ACTIVE_PAGES: &[(&str, &str)] = &[
    ("home", "HOME_ACTIVE"),
    ("leadership", "LEADERSHIP_ACTIVE"),
    ("calendar", "CALENDAR_ACTIVE"),
    ("forms", "FORMS_ACTIVE"),
    ("awards", "AWARDS_ACTIVE"),
];

const ACTIVE_CLASS: &str = "class=\"active\"";

/// Ordered template variables
pub type Variables = Vec<(String, String)>;

#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub base: String,
    pub header: String,
    pub navigation: String,
    pub footer: String,
}

impl TemplateSet {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            base: load_template(dir, BASE_TEMPLATE)?,
            header: load_template(dir, HEADER_TEMPLATE)?,
            navigation: load_template(dir, NAVIGATION_TEMPLATE)?,
            footer: load_template(dir, FOOTER_TEMPLATE)?,
        })
    }
}

fn load_template(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| FixError::Template {
        name: name.to_string(),
        path,
        source,
    })
}

/// Everything needed to render one page
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    pub page_title: String,
    pub main_content: String,
    /// Where the page goes, relative to the output root
    pub output_path: PathBuf,
    pub depth: usize,
    pub active_page: String,
    pub page_specific_styles: String,
    pub additional_head_content: String,
    pub additional_scripts: String,
}

/// Link and active-state variables for a page at `depth`.
pub fn navigation_variables(depth: usize, active_page: &str) -> Variables {
    let prefix = relative_prefix(depth);

    let mut vars: Variables = ROUTES
        .iter()
        .map(|route| {
            (
                route.template_var.to_string(),
                format!("{}{}", prefix, route.canonical),
            )
        })
        .collect();
    vars.push(("ASSETS_PATH".to_string(), prefix));

    for (page, var) in ACTIVE_PAGES {
        let value = if *page == active_page { ACTIVE_CLASS } else { "" };
        vars.push((var.to_string(), value.to_string()));
    }

    vars
}

/// Substitute every `{{KEY}}`. Unknown placeholders are left in place.
pub fn replace_variables(template: &str, vars: &[(String, String)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("{{{{{}}}}}", key);
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, value);
        }
    }
    result
}

fn lookup<'a>(vars: &'a [(String, String)], key: &str) -> &'a str {
    vars.iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_default()
}

pub struct TemplateGenerator {
    templates: TemplateSet,
    output_root: PathBuf,
}

impl TemplateGenerator {
    pub fn new(templates: TemplateSet, output_root: impl Into<PathBuf>) -> Self {
        Self {
            templates,
            output_root: output_root.into(),
        }
    }

    pub fn from_dir(templates_dir: &Path, output_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(TemplateSet::load(templates_dir)?, output_root))
    }

    /// Render a page without touching the filesystem.
    pub fn render_page(&self, config: &PageConfig) -> String {
        let nav_vars = navigation_variables(config.depth, &config.active_page);
        let navigation_content = replace_variables(&self.templates.navigation, &nav_vars);

        let mut header_vars = nav_vars.clone();
        header_vars.push(("NAVIGATION_CONTENT".to_string(), navigation_content));
        let header_content = replace_variables(&self.templates.header, &header_vars);

        let footer_content = replace_variables(&self.templates.footer, &nav_vars);

        let page_vars: Variables = vec![
            ("PAGE_TITLE".to_string(), config.page_title.clone()),
            ("MAIN_CONTENT".to_string(), config.main_content.clone()),
            ("HEADER_CONTENT".to_string(), header_content),
            ("FOOTER_CONTENT".to_string(), footer_content),
            (
                "PAGE_SPECIFIC_STYLES".to_string(),
                config.page_specific_styles.clone(),
            ),
            (
                "ADDITIONAL_HEAD_CONTENT".to_string(),
                config.additional_head_content.clone(),
            ),
            (
                "ADDITIONAL_SCRIPTS".to_string(),
                config.additional_scripts.clone(),
            ),
            (
                "ASSETS_PATH".to_string(),
                lookup(&nav_vars, "ASSETS_PATH").to_string(),
            ),
        ];

        replace_variables(&self.templates.base, &page_vars)
    }

    /// Render a page and write it under the output root, creating
    /// directories as needed.
    pub fn generate_page(&self, config: &PageConfig) -> Result<String> {
        let html = self.render_page(config);
        let full_path = self.output_root.join(&config.output_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| FixError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&full_path, &html).map_err(|source| FixError::Write {
            path: full_path.clone(),
            source,
        })?;

        info!("Generated {}", full_path.display());
        Ok(html)
    }
}
