#![allow(dead_code)]

use anyhow::{Context, Result};
use langscope::{CatalogConfig, CatalogRepository, WalkReport};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SITE_CATALOG: &str = "language/en-GB/en-GB.ini";
pub const SITE_COMPONENT_CATALOG: &str = "language/en-GB/en-GB.com_shop.ini";
pub const SITE_OVERRIDES: &str = "language/overrides/en-GB.override.ini";
pub const ADMIN_CATALOG: &str = "administrator/language/en-GB/en-GB.ini";
pub const ADMIN_OVERRIDES: &str = "administrator/language/overrides/en-GB.override.ini";

// Scratch CMS checkout with the default language layout; removed on drop.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("creating temp workspace")?,
        })
    }

    /// Workspace seeded with site, component, override and administrator catalogs.
    pub fn seeded() -> Result<Self> {
        let ws = Self::new()?;
        ws.write(
            SITE_CATALOG,
            "; Site language\nAXS_PAY = \"Pay\"\nAXS_SAVE = \"Save\"\nAXS_BACK = \"Back\"\n",
        )?;
        ws.write(
            SITE_COMPONENT_CATALOG,
            "COM_SHOP_PAY = \"Pay\"\nCOM_SHOP_CART = \"Cart\"\n",
        )?;
        ws.write(SITE_OVERRIDES, "AXS_SAVE = \"Save changes\"\n")?;
        ws.write(ADMIN_CATALOG, "AXS_PAY = \"Payment\"\nAXS_USERS = \"Users\"\n")?;
        ws.write(ADMIN_OVERRIDES, "")?;
        Ok(ws)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.path(rel);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::for_workspace(self.root())
    }

    pub fn load(&self) -> (CatalogRepository, WalkReport) {
        self.config().build_repository()
    }
}
