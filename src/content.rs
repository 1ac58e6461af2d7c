//! Static site copy.

pub const OWNER: &str = "Panvish Dowripilli";
pub const BRAND: &str = "Panvish";
pub const ROLE: &str = "Web Developer";
pub const EMAIL: &str = "panvishd@gmail.com";
pub const PHONE: &str = "8639460413";

pub const SUMMARY: &str = "Detail-focused B.Tech in Computer Science student with a strong foundation in Data Structures and Algorithms. Passionate about leveraging this problem-solving background to build user-friendly and responsive web interfaces. Proficient in HTML, CSS, JavaScript, and React.js, with hands-on experience demonstrated through developing multiple frontend projects. Eager to contribute to a dynamic team and grow as a frontend developer.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    /// Id of the section the link glides to.
    pub anchor: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Home", anchor: "home" },
    NavItem { label: "About", anchor: "about" },
    NavItem { label: "Projects", anchor: "projects" },
    NavItem { label: "Skills", anchor: "skills" },
    NavItem { label: "Certifications", anchor: "certifications" },
    NavItem { label: "Contact", anchor: "contact" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink { name: "GitHub", url: "https://github.com", icon: "🐙" },
    SocialLink { name: "LinkedIn", url: "https://linkedin.com", icon: "💼" },
    SocialLink { name: "LeetCode", url: "https://leetcode.com", icon: "⚡" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub detail: &'static str,
    pub icon: &'static str,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        title: "B.Tech, Computer Science & Engineering",
        subtitle: "Raghu Institute of Technology",
        detail: "9.08 CGPA",
        icon: "🎓",
    },
    Achievement {
        title: "Intermediate",
        subtitle: "Sri Chaitanya Junior College",
        detail: "87.4%",
        icon: "📚",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub live_url: &'static str,
    pub code_url: &'static str,
    pub tech: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Resume Analyzer",
        description: "An AI-powered tool built with React and Gemini API to scan and analyze resume content.",
        icon: "🔍",
        live_url: "#",
        code_url: "#",
        tech: &["React", "Gemini API", "AI"],
    },
    Project {
        title: "Gericht Restaurant",
        description: "A fully responsive, single-page website for a fine-dining restaurant using React.js.",
        icon: "🍽️",
        live_url: "#",
        code_url: "#",
        tech: &["React", "Responsive Design"],
    },
    Project {
        title: "GPT-3 Landing Page",
        description: "A modern UI/UX landing page built with React showcasing cutting-edge design principles.",
        icon: "🤖",
        live_url: "#",
        code_url: "#",
        tech: &["React", "Modern UI/UX"],
    },
    Project {
        title: "Mensplore",
        description: "An eCommerce front-end using HTML, CSS, and JavaScript for men's fashion.",
        icon: "🛍️",
        live_url: "#",
        code_url: "#",
        tech: &["HTML", "CSS", "JavaScript"],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const SKILLS: &[Skill] = &[
    Skill { name: "HTML", icon: "🌐" },
    Skill { name: "CSS", icon: "🎨" },
    Skill { name: "JavaScript", icon: "📜" },
    Skill { name: "React.js", icon: "⚛️" },
    Skill { name: "Three.js", icon: "🎲" },
    Skill { name: "MySQL", icon: "🗄️" },
    Skill { name: "Tailwind CSS", icon: "🎯" },
    Skill { name: "Vite", icon: "⚡" },
    Skill { name: "C++", icon: "🔧" },
    Skill { name: "Java", icon: "☕" },
];

pub const TOOLS: &[&str] = &[
    "Data Structures & Algorithms",
    "Problem Solving",
    "Responsive Design",
    "Git & GitHub",
    "Canva",
    "Cursor.ai",
    "WebStorm",
    "VS Code",
    "UI/UX Design",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Certification {
    pub title: &'static str,
    pub issuer: &'static str,
    pub date: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub image: Option<&'static str>,
}

pub const CERTIFICATIONS: &[Certification] = &[
    Certification {
        title: "Deloitte Virtual Technology Job Simulation",
        issuer: "Deloitte",
        date: "2024",
        description: "Completed comprehensive virtual job simulation covering technology consulting and digital transformation.",
        icon: "🏆",
        image: Some("/assets/deloitte.jpg"),
    },
    Certification {
        title: "ApnaCollege Sigma 5.0 Batch",
        issuer: "ApnaCollege",
        date: "2024",
        description: "Student of ApnaCollege in Sigma 5.0 batch where I learnt core concepts of DSA, Web Development, Aptitude and Reasoning.",
        icon: "🎓",
        image: Some("/assets/apna-college.jpg"),
    },
    Certification {
        title: "Meta Frontend Development",
        issuer: "Meta",
        date: "2024",
        description: "Learnt Frontend basics with hands-on experience. This was taught by the Meta staff.",
        icon: "📱",
        image: Some("/assets/meta-frontend.jpg"),
    },
    Certification {
        title: "Web Development Fundamentals",
        issuer: "Coursera",
        date: "2023",
        description: "Comprehensive course covering HTML, CSS, JavaScript, and modern web development practices.",
        icon: "💻",
        image: None,
    },
    Certification {
        title: "React.js Development",
        issuer: "Udemy",
        date: "2023",
        description: "Advanced React.js course covering hooks, context, and modern React development patterns.",
        icon: "⚛️",
        image: None,
    },
];

/// The summary broken into sentences, each keeping its full stop, so every
/// line of the About text can reveal on its own.
pub fn summary_sentences() -> Vec<String> {
    SUMMARY
        .split(". ")
        .map(|sentence| {
            let sentence = sentence.trim_end_matches('.');
            format!("{sentence}.")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_splits_into_four_sentences() {
        let sentences = summary_sentences();

        assert_eq!(sentences.len(), 4);
        assert!(sentences.iter().all(|sentence| sentence.ends_with('.')));
        assert!(!sentences.iter().any(|sentence| sentence.ends_with("..")));
        assert!(sentences[3].starts_with("Eager to contribute"));
    }

    #[test]
    fn navigation_points_at_every_section() {
        let anchors: Vec<_> = NAV_ITEMS.iter().map(|item| item.anchor).collect();
        assert_eq!(
            anchors,
            ["home", "about", "projects", "skills", "certifications", "contact"]
        );
    }
}
