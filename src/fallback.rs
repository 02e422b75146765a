//! Static substitute datasets served when the reporting API is unconfigured
//! or a live query fails. Shapes mirror the live aggregators exactly; apart
//! from the article dates (stamped with the current day so the tables stay
//! plausible) every value is a fixed literal.

use chrono::NaiveDate;

use crate::aggregators::{ArticleMetric, CategoryMetric, DailyMetric, PlatformDailyMetric};

pub fn overview_series() -> Vec<DailyMetric> {
    const DAYS: [(&str, i64, i64, f64); 14] = [
        ("2024-01-01", 12450, 890, 7.1),
        ("2024-01-02", 13200, 950, 7.2),
        ("2024-01-03", 11800, 820, 6.9),
        ("2024-01-04", 14500, 1100, 7.6),
        ("2024-01-05", 15200, 1200, 7.9),
        ("2024-01-06", 13900, 980, 7.0),
        ("2024-01-07", 16800, 1350, 8.0),
        ("2024-01-08", 14200, 1050, 7.4),
        ("2024-01-09", 15600, 1180, 7.6),
        ("2024-01-10", 17200, 1420, 8.3),
        ("2024-01-11", 16500, 1280, 7.8),
        ("2024-01-12", 15100, 1150, 7.6),
        ("2024-01-13", 14800, 1090, 7.4),
        ("2024-01-14", 18200, 1520, 8.4),
    ];

    DAYS.iter()
        .map(|&(date, views, clicks, engagement)| DailyMetric {
            date: date.to_string(),
            views,
            clicks,
            engagement,
        })
        .collect()
}

/// The top-3 substitute. Dated with the current day at call time.
pub fn top_articles(today: NaiveDate) -> Vec<ArticleMetric> {
    vec![
        ArticleMetric {
            id: 1,
            title: "Getting Started with Next.js 15".to_string(),
            category: "Technology".to_string(),
            views: 1250,
            clicks: 187,
            engagement: 4.5,
            date: today,
            path: "/blog/technology/getting-started-nextjs-15".to_string(),
            bounce_rate: 35.2,
            active_users: 890,
        },
        ArticleMetric {
            id: 2,
            title: "Understanding React Server Components".to_string(),
            category: "Development".to_string(),
            views: 980,
            clicks: 147,
            engagement: 5.2,
            date: today,
            path: "/blog/development/react-server-components".to_string(),
            bounce_rate: 28.4,
            active_users: 720,
        },
        ArticleMetric {
            id: 3,
            title: "AI-Powered Analytics Dashboard Guide".to_string(),
            category: "Analytics".to_string(),
            views: 875,
            clicks: 131,
            engagement: 6.1,
            date: today,
            path: "/blog/analytics/ai-powered-dashboard-guide".to_string(),
            bounce_rate: 31.8,
            active_users: 650,
        },
    ]
}

/// The full article-table substitute, same shape as the live pages rollup.
pub fn article_pages(today: NaiveDate) -> Vec<ArticleMetric> {
    struct Row {
        title: &'static str,
        category: &'static str,
        views: i64,
        clicks: i64,
        engagement: f64,
        path: &'static str,
        bounce_rate: f64,
        active_users: i64,
    }

    const ROWS: [Row; 8] = [
        Row {
            title: "Understanding React Server Components in 2024",
            category: "React",
            views: 45230,
            clicks: 3890,
            engagement: 6.4,
            path: "/blog/react/understanding-react-server-components",
            bounce_rate: 32.1,
            active_users: 30180,
        },
        Row {
            title: "Next.js 15: Complete Guide to App Router",
            category: "Next.js",
            views: 38900,
            clicks: 3120,
            engagement: 5.8,
            path: "/blog/next-js/complete-guide-app-router",
            bounce_rate: 34.6,
            active_users: 25410,
        },
        Row {
            title: "TypeScript 5.3 New Features Explained",
            category: "TypeScript",
            views: 32500,
            clicks: 2450,
            engagement: 5.1,
            path: "/blog/typescript/5-3-new-features",
            bounce_rate: 36.9,
            active_users: 21320,
        },
        Row {
            title: "Building Scalable APIs with Node.js",
            category: "Node.js",
            views: 29800,
            clicks: 2180,
            engagement: 4.9,
            path: "/blog/node-js/building-scalable-apis",
            bounce_rate: 38.2,
            active_users: 19560,
        },
        Row {
            title: "Tailwind CSS Best Practices for 2024",
            category: "CSS",
            views: 27600,
            clicks: 1950,
            engagement: 4.3,
            path: "/blog/css/tailwind-best-practices",
            bounce_rate: 40.5,
            active_users: 17890,
        },
        Row {
            title: "PostgreSQL Performance Optimization Tips",
            category: "Database",
            views: 24300,
            clicks: 1680,
            engagement: 5.6,
            path: "/blog/database/postgresql-performance-tips",
            bounce_rate: 33.8,
            active_users: 15720,
        },
        Row {
            title: "State Management with Zustand vs Redux",
            category: "React",
            views: 22100,
            clicks: 1520,
            engagement: 4.7,
            path: "/blog/react/zustand-vs-redux",
            bounce_rate: 37.4,
            active_users: 14350,
        },
        Row {
            title: "Vercel Deployment: A Complete Guide",
            category: "DevOps",
            views: 19800,
            clicks: 1340,
            engagement: 4.1,
            path: "/blog/devops/vercel-deployment-guide",
            bounce_rate: 41.2,
            active_users: 12680,
        },
    ];

    ROWS.iter()
        .enumerate()
        .map(|(index, row)| ArticleMetric {
            id: index + 1,
            title: row.title.to_string(),
            category: row.category.to_string(),
            views: row.views,
            clicks: row.clicks,
            engagement: row.engagement,
            date: today,
            path: row.path.to_string(),
            bounce_rate: row.bounce_rate,
            active_users: row.active_users,
        })
        .collect()
}

pub fn category_stats() -> Vec<CategoryMetric> {
    const ROWS: [(&str, usize, i64, &str); 7] = [
        ("React", 24, 125000, "7.8"),
        ("Next.js", 18, 98000, "7.6"),
        ("TypeScript", 15, 82000, "7.4"),
        ("Node.js", 12, 65000, "7.2"),
        ("CSS", 10, 54000, "7.0"),
        ("Database", 8, 42000, "6.9"),
        ("DevOps", 6, 28000, "6.8"),
    ];

    ROWS.iter()
        .map(|&(name, articles, views, avg_ctr)| CategoryMetric {
            name: name.to_string(),
            views,
            articles,
            avg_ctr: avg_ctr.to_string(),
        })
        .collect()
}

pub fn social_series() -> Vec<PlatformDailyMetric> {
    const DAYS: [(&str, i64, i64, i64, i64, i64); 14] = [
        ("2024-01-01", 1250, 2100, 890, 1680, 720),
        ("2024-01-02", 1420, 2350, 920, 1790, 810),
        ("2024-01-03", 1180, 1980, 850, 1520, 690),
        ("2024-01-04", 1550, 2580, 1100, 1950, 920),
        ("2024-01-05", 1680, 2720, 1180, 2100, 980),
        ("2024-01-06", 1490, 2420, 980, 1820, 850),
        ("2024-01-07", 1820, 2980, 1280, 2280, 1050),
        ("2024-01-08", 1520, 2490, 1050, 1890, 890),
        ("2024-01-09", 1680, 2650, 1120, 2050, 950),
        ("2024-01-10", 1850, 3020, 1320, 2380, 1120),
        ("2024-01-11", 1750, 2850, 1220, 2180, 1020),
        ("2024-01-12", 1620, 2680, 1080, 1980, 920),
        ("2024-01-13", 1580, 2590, 1050, 1920, 880),
        ("2024-01-14", 1950, 3180, 1420, 2520, 1180),
    ];

    DAYS.iter()
        .map(
            |&(date, facebook, linkedin, pinterest, x_com, instagram)| PlatformDailyMetric {
                date: date.to_string(),
                facebook,
                linkedin,
                pinterest,
                x_com,
                instagram,
            },
        )
        .collect()
}
