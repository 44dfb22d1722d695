//! Built-in UI strings

pub const ZH_CN: &[(&str, &str)] = &[
    ("menu_home", "首页"),
    ("menu_archive", "归档"),
    ("menu_about", "关于"),
    ("menu_search", "搜索"),
    ("theme_toggle", "切换主题"),
    ("menu_toggle", "切换菜单"),
    ("home_intro", "分享编程技术与生活感悟的个人博客。在这里，我们一起探索技术的深度。"),
    ("home_browse", "浏览所有文章"),
    ("home_learn_more", "了解更多"),
    ("home_latest", "最新文章"),
    ("home_latest_sub", "探索编程技术与生活感悟的深度内容"),
    ("home_view_all", "查看所有文章"),
    ("home_tags", "热门标签"),
    ("home_tags_sub", "探索不同技术领域的内容"),
    ("home_about_more", "了解更多关于我"),
    ("stats_posts", "文章总数"),
    ("stats_tags", "标签数量"),
    ("stats_words", "总字数"),
    ("stats_days", "运行天数"),
    ("card_read_more", "阅读更多"),
    ("card_read", "阅读"),
    ("archive_title", "文章归档"),
    ("archive_sub", "记录学习、思考和成长过程的全部文章"),
    ("archive_results", "篇文章"),
    ("archive_categories", "个分类"),
    ("archive_tags", "个标签"),
    ("archive_timeline", "发布时间线"),
    ("archive_year", "{year}年发布了 {count} 篇文章"),
    ("view_grid", "网格视图"),
    ("view_list", "列表视图"),
    ("filter_placeholder", "搜索文章..."),
    ("filter_toggle", "筛选"),
    ("filter_by_category", "按分类筛选"),
    ("filter_by_tag", "按标签筛选"),
    ("filter_all_categories", "所有分类"),
    ("filter_all_tags", "所有标签"),
    ("filter_clear", "清除所有筛选"),
    ("filter_found", "找到 {count} 篇文章"),
    ("filter_query", "搜索"),
    ("filter_category", "分类"),
    ("filter_tag", "标签"),
    ("filter_empty", "没有找到相关文章"),
    ("filter_apply", "应用"),
    ("search_title", "搜索文章"),
    ("search_sub", "通过关键词、分类或标签快速找到你感兴趣的文章"),
    ("search_placeholder", "输入关键词搜索文章..."),
    ("search_sort_date", "按日期"),
    ("search_sort_title", "按标题"),
    ("search_sort_category", "按分类"),
    ("search_order_asc", "升序"),
    ("search_order_desc", "降序"),
    ("search_popular", "热门标签"),
    ("search_suggest", "热门标签推荐"),
    ("search_submit", "搜索"),
    ("post_articles", "文章"),
    ("post_share_twitter", "分享到Twitter"),
    ("post_copy_link", "复制链接"),
    ("post_back", "返回文章列表"),
    ("post_related", "相关文章"),
    ("post_related_sub", "你可能也会喜欢这些内容"),
    ("post_prev", "上一篇"),
    ("post_next", "下一篇"),
    ("post_not_found", "文章未找到"),
    ("post_not_found_text", "抱歉，找不到您请求的文章。"),
    ("about_title", "关于我"),
    ("about_story", "我的故事"),
    ("about_expertise", "技术专长"),
    ("about_experience", "工作经历"),
    ("about_skills", "技能栈"),
    ("about_achievements", "成就与贡献"),
    ("about_contact", "让我们一起创造精彩"),
    ("not_found_title", "页面未找到"),
    ("not_found_text", "抱歉，您访问的页面不存在或已被移动。"),
    ("not_found_hint", "请检查URL是否正确，或返回首页继续浏览。"),
    ("not_found_home", "返回首页"),
    ("not_found_search", "搜索文章"),
    ("not_found_suggest", "热门文章推荐"),
    ("not_found_back", "返回上一页"),
    ("footer_links", "快速导航"),
    ("footer_rights", "保留所有权利。"),
    ("footer_feed", "订阅"),
];

pub const EN: &[(&str, &str)] = &[
    ("menu_home", "Home"),
    ("menu_archive", "Archive"),
    ("menu_about", "About"),
    ("menu_search", "Search"),
    ("theme_toggle", "Toggle theme"),
    ("menu_toggle", "Toggle menu"),
    ("home_intro", "A personal blog about programming and life. Come explore with me."),
    ("home_browse", "Browse all posts"),
    ("home_learn_more", "Learn more"),
    ("home_latest", "Latest posts"),
    ("home_latest_sub", "Recent writing on programming and life"),
    ("home_view_all", "View all posts"),
    ("home_tags", "Popular tags"),
    ("home_tags_sub", "Explore topics across the blog"),
    ("home_about_more", "More about me"),
    ("stats_posts", "Posts"),
    ("stats_tags", "Tags"),
    ("stats_words", "Words"),
    ("stats_days", "Days running"),
    ("card_read_more", "Read more"),
    ("card_read", "Read"),
    ("archive_title", "Archive"),
    ("archive_sub", "Every post, filtered the way you like"),
    ("archive_results", "posts"),
    ("archive_categories", "categories"),
    ("archive_tags", "tags"),
    ("archive_timeline", "Timeline"),
    ("archive_year", "{count} posts published in {year}"),
    ("view_grid", "Grid view"),
    ("view_list", "List view"),
    ("filter_placeholder", "Search posts..."),
    ("filter_toggle", "Filter"),
    ("filter_by_category", "Filter by category"),
    ("filter_by_tag", "Filter by tag"),
    ("filter_all_categories", "All categories"),
    ("filter_all_tags", "All tags"),
    ("filter_clear", "Clear all filters"),
    ("filter_found", "Found {count} posts"),
    ("filter_query", "Search"),
    ("filter_category", "Category"),
    ("filter_tag", "Tag"),
    ("filter_empty", "No matching posts"),
    ("filter_apply", "Apply"),
    ("search_title", "Search"),
    ("search_sub", "Find posts by keyword, category or tag"),
    ("search_placeholder", "Type to search posts..."),
    ("search_sort_date", "By date"),
    ("search_sort_title", "By title"),
    ("search_sort_category", "By category"),
    ("search_order_asc", "Ascending"),
    ("search_order_desc", "Descending"),
    ("search_popular", "Popular tags"),
    ("search_suggest", "Try a popular tag"),
    ("search_submit", "Search"),
    ("post_articles", "Posts"),
    ("post_share_twitter", "Share on Twitter"),
    ("post_copy_link", "Copy link"),
    ("post_back", "Back to all posts"),
    ("post_related", "Related posts"),
    ("post_related_sub", "You may also like"),
    ("post_prev", "Previous"),
    ("post_next", "Next"),
    ("post_not_found", "Post not found"),
    ("post_not_found_text", "Sorry, the post you asked for does not exist."),
    ("about_title", "About me"),
    ("about_story", "My story"),
    ("about_expertise", "Expertise"),
    ("about_experience", "Experience"),
    ("about_skills", "Skills"),
    ("about_achievements", "Achievements"),
    ("about_contact", "Let's build something together"),
    ("not_found_title", "Page not found"),
    ("not_found_text", "Sorry, the page you visited does not exist or has moved."),
    ("not_found_hint", "Check the URL, or head back home."),
    ("not_found_home", "Back home"),
    ("not_found_search", "Search posts"),
    ("not_found_suggest", "Recent posts"),
    ("not_found_back", "Go back"),
    ("footer_links", "Quick links"),
    ("footer_rights", "All rights reserved."),
    ("footer_feed", "Feed"),
];
