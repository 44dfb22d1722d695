//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# skyblog configuration

# Site
title: 赤心巡天
subtitle: Loyal Heart of the Sky Patrol
description: 分享编程技术与生活感悟的个人博客
author: Sky Patrol
language: zh-CN

# URL
url: http://localhost:4000
root: /

# Directory
posts_dir: posts
assets_dir: assets
public_dir: public
image_base: ''

# Writing
default_category: 未分类
render_drafts: false
date_format: '%Y/%-m/%-d'
reading_speed: 300
reading_time_format: '{}分钟'

# Listings
latest_posts: 6
related_posts: 3
card_tags: 3
popular_tags: 8
search_debounce_ms: 300
feed_limit: 20

# Server
server:
  ip: localhost
  port: 4000
  live_reload: true

menu:
  home: /
  archive: /archive
  about: /about
  search: /search

social:
  - name: GitHub
    url: https://github.com/

about:
  role: 全栈开发工程师
  tagline: 热爱分享技术见解和人生感悟
  story:
    - 在这里写下你的故事。
  location: ''
  status: ''
  hobby: ''
  skills:
    - name: Rust
      level: 80
      category: 编程语言
  experiences: []
  achievements: []
"#;

fn sample_post(date: &str) -> String {
    format!(
        r#"---
title: Hello World
date: {}
category: 随笔
tags:
  - 开始
excerpt: 欢迎来到你的新博客。
---

欢迎来到你的新博客！这是第一篇文章，编辑 `posts/hello-world.md` 或者运行
`skyblog new "文章标题"` 开始写作。

<!-- more -->

## 快速开始

```bash
$ skyblog server     # 本地预览，修改后自动刷新
$ skyblog generate   # 导出静态站点到 public/
```

图片放在 `assets/images/` 下，用 `![说明](../../assets/images/photo.png)` 引用。
"#,
        date
    )
}

/// Scaffold a blog in the given directory; existing files are kept
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("assets/images"))?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    write_new(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;
    write_new(&target_dir.join("posts/hello-world.md"), &sample_post(&today))?;

    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("{:?} already exists, left untouched", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::info!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffolds_loadable_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        assert!(tmp.path().join("assets/images").is_dir());
        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.config.title, "赤心巡天");
        assert_eq!(blog.config.about.skills.len(), 1);

        let store = blog.load_store();
        assert_eq!(store.len(), 1);
        let post = &store.posts()[0];
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.category, "随笔");
        assert_eq!(post.excerpt, "欢迎来到你的新博客。");
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(tmp.path()).unwrap();
        let config = fs::read_to_string(tmp.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
