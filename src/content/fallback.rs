//! Built-in posts shown when no markdown post can be loaded

use chrono::NaiveDate;

use super::Post;
use crate::helpers::escape_html;

struct Entry {
    slug: &'static str,
    title: &'static str,
    date: (i32, u32, u32),
    excerpt: &'static str,
    content: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
    reading_time: &'static str,
}

const AUTHOR: &str = "Sky Patrol";

const ENTRIES: &[Entry] = &[
    Entry {
        slug: "responsive-design-guide",
        title: "响应式设计完全指南：从移动优先到现代CSS布局",
        date: (2024, 1, 28),
        excerpt: "深入探讨响应式设计的核心理念、实现技巧和最佳实践，帮助开发者构建真正适配各种设备的现代网站。",
        content: "响应式设计是一种网页设计方法，旨在创建能够自动适应不同设备屏幕尺寸和分辨率的网站。无论用户使用手机、平板还是桌面设备访问，网站都能提供最佳的浏览体验。",
        category: "前端开发",
        tags: &["响应式设计", "CSS", "移动优先", "布局", "前端"],
        reading_time: "8分钟",
    },
    Entry {
        slug: "javascript-async-guide",
        title: "JavaScript异步编程深度解析：从回调到Async/Await",
        date: (2024, 1, 22),
        excerpt: "全面解析JavaScript异步编程的演进历程，从传统回调到Promise，再到现代的Async/Await语法。",
        content: "JavaScript是单线程语言，异步编程对于处理耗时操作（如网络请求、文件读写）至关重要。从回调函数到Promise，再到Async/Await，JavaScript异步编程不断演进。",
        category: "前端开发",
        tags: &["JavaScript", "异步编程", "Promise", "Async/Await", "回调"],
        reading_time: "10分钟",
    },
    Entry {
        slug: "react-performance-optimization",
        title: "React性能优化实战指南：从理论到实践",
        date: (2024, 1, 18),
        excerpt: "深入探讨React应用的性能优化策略，包括组件优化、状态管理、代码分割等实用技巧。",
        content: "随着React应用规模的增长，性能问题逐渐成为用户体验的关键因素。通过组件优化、状态管理优化和代码分割等技术，可以显著提升应用性能。",
        category: "前端开发",
        tags: &["React", "性能优化", "组件优化", "状态管理", "代码分割"],
        reading_time: "12分钟",
    },
    Entry {
        slug: "web-security-best-practices",
        title: "Web安全防护指南：从XSS到CSRF的全面防御",
        date: (2024, 1, 15),
        excerpt: "系统介绍Web应用面临的安全威胁及相应的防护措施，帮助开发者构建更安全的应用。",
        content: "Web应用面临多种安全威胁，包括XSS、CSRF、SQL注入等。通过输入验证、输出编码、使用安全令牌等措施，可以有效防护这些攻击。",
        category: "前端开发",
        tags: &["Web安全", "XSS", "CSRF", "SQL注入", "安全防护"],
        reading_time: "15分钟",
    },
    Entry {
        slug: "nodejs-backend-development",
        title: "Node.js后端开发实践：从API设计到数据库优化",
        date: (2024, 1, 12),
        excerpt: "分享Node.js后端开发的实战经验，包括RESTful API设计、数据库优化、错误处理等核心内容。",
        content: "Node.js后端开发需要关注API设计、数据库优化、错误处理等多个方面。通过合理的设计和优化，可以构建高性能、可维护的后端应用。",
        category: "后端开发",
        tags: &["Node.js", "后端开发", "API设计", "数据库优化", "错误处理"],
        reading_time: "11分钟",
    },
    Entry {
        slug: "python-data-analysis",
        title: "Python数据分析实战：从数据清洗到可视化",
        date: (2024, 1, 10),
        excerpt: "使用Python进行数据分析的完整流程，包括数据获取、清洗、分析和可视化等关键步骤。",
        content: "Python数据分析包括数据获取、清洗、分析和可视化等步骤。通过pandas、numpy、matplotlib等工具，可以高效地完成数据分析任务。",
        category: "数据科学",
        tags: &["Python", "数据分析", "pandas", "可视化", "数据清洗"],
        reading_time: "9分钟",
    },
];

/// The built-in post list, newest first
pub fn fallback_posts() -> Vec<Post> {
    ENTRIES
        .iter()
        .filter_map(|entry| {
            let (y, m, d) = entry.date;
            Some(Post {
                slug: entry.slug.to_string(),
                title: entry.title.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                excerpt: entry.excerpt.to_string(),
                content: entry.content.to_string(),
                html: format!("<p>{}</p>", escape_html(entry.content)),
                category: entry.category.to_string(),
                tags: entry.tags.iter().map(|t| t.to_string()).collect(),
                author: AUTHOR.to_string(),
                reading_time: entry.reading_time.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_posts() {
        let posts = fallback_posts();
        assert_eq!(posts.len(), 6);
        assert_eq!(posts[0].slug, "responsive-design-guide");
        assert_eq!(posts[5].slug, "python-data-analysis");
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
        assert!(posts.iter().all(|p| p.author == "Sky Patrol"));
    }

    #[test]
    fn test_fallback_categories() {
        let posts = fallback_posts();
        let frontend = posts.iter().filter(|p| p.category == "前端开发").count();
        assert_eq!(frontend, 4);
        assert_eq!(posts[4].category, "后端开发");
        assert_eq!(posts[5].category, "数据科学");
    }
}
