use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{window, Element, MouseEvent};
use yew::prelude::*;

use super::runtime::{use_section, MotionRuntime};
use crate::content::{self, Certification, Project, Skill};
use crate::motion::choreography::{self, AboutRig, CardParts, DeckRig, Group, HeroRig, NavRig};
use crate::motion::scroll::NavMenu;
use crate::motion::split::{split_letters, Particle};

pub(super) fn select(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(super) fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn letters(text: &str, class: &'static str, highlight: bool) -> Html {
    split_letters(text)
        .into_iter()
        .map(|glyph| {
            if glyph.animated {
                html! {
                    <span class={classes!(class, highlight.then_some("gradient-text"))}>
                        {glyph.ch.to_string()}
                    </span>
                }
            } else {
                html! { <span class="letter-space">{" "}</span> }
            }
        })
        .collect()
}

/// A section title split into letters, the last words in the accent colour.
fn split_heading(plain: &str, accent: &str) -> Html {
    html! {
        <>
            {letters(plain, "heading-letter", false)}
            {letters(accent, "heading-letter", true)}
        </>
    }
}

fn heading_group(runtime: &MotionRuntime, heading: &Element) -> Option<Group> {
    let letters = select_all(heading, ".heading-letter");
    Some(Group::new(runtime.adopt(heading)?, runtime.adopt_all(&letters)))
}

fn particle_style(particle: &Particle) -> String {
    format!("left: {:.2}%; top: {:.2}%;", particle.left, particle.top)
}

/// The nodes of one card, found before any of them is adopted.
struct CardNodes {
    card: Element,
    glow: Option<Element>,
    content: Option<Element>,
    icon: Option<Element>,
    image: Option<Element>,
    particles: Option<Element>,
    label: Option<Element>,
    tags: Vec<Element>,
    buttons: Vec<Element>,
}

impl CardNodes {
    fn find(card: Element) -> Self {
        Self {
            glow: select(&card, ".card-glow"),
            content: select(&card, ".card-content"),
            icon: select(&card, ".card-icon"),
            image: select(&card, ".card-image"),
            particles: select(&card, ".card-particles"),
            label: select(&card, ".card-label"),
            tags: select_all(&card, ".card-tag"),
            buttons: select_all(&card, ".card-button"),
            card,
        }
    }

    fn adopt(&self, runtime: &MotionRuntime) -> Option<CardParts> {
        let adopt = |node: &Option<Element>| node.as_ref().and_then(|node| runtime.adopt(node));

        let mut parts = CardParts::new(runtime.adopt(&self.card)?);
        parts.glow = adopt(&self.glow);
        parts.content = adopt(&self.content);
        parts.icon = adopt(&self.icon);
        parts.image = adopt(&self.image);
        parts.particles = adopt(&self.particles);
        parts.label = adopt(&self.label);
        parts.tags = runtime.adopt_all(&self.tags);
        parts.buttons = runtime.adopt_all(&self.buttons);
        Some(parts)
    }
}

/// Builds the rig of a card section: a split heading and a grid of cards.
fn deck_rig(runtime: &MotionRuntime, root: &NodeRef, card_selector: &str) -> Option<DeckRig> {
    let root = root.cast::<Element>()?;
    let heading = select(&root, ".section-heading")?;
    let grid = select(&root, ".card-grid")?;
    let cards: Vec<CardNodes> = select_all(&grid, card_selector)
        .into_iter()
        .map(CardNodes::find)
        .collect();

    Some(DeckRig {
        root: runtime.adopt(&root)?,
        heading: heading_group(runtime, &heading)?,
        cards: cards
            .iter()
            .filter_map(|card| card.adopt(runtime))
            .collect(),
    })
}

fn card_particles(count: usize) -> Html {
    html! {
        <div class="card-particles" aria-hidden="true">
            { for (0..count).map(|index| html! {
                <span class={classes!("card-speck", format!("speck-{index}"))}></span>
            }) }
        </div>
    }
}

fn glide_to_anchor(runtime: Option<&MotionRuntime>, anchor: &str) {
    let Some(target) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(anchor))
    else {
        return;
    };

    if !runtime.is_some_and(|runtime| runtime.glide_to(&target)) {
        target.scroll_into_view();
    }
}

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub solid: bool,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let bar = use_node_ref();
    let runtime = use_context::<MotionRuntime>();

    {
        let bar = bar.clone();
        use_section(move |runtime| {
            let bar = bar.cast::<Element>()?;
            let items = select_all(&bar, ".nav-item");
            let rig = NavRig {
                bar: runtime.adopt(&bar)?,
                items: runtime.adopt_all(&items),
            };
            Some(choreography::navigation(&rig))
        });
    }

    let menu = use_state_eq(NavMenu::default);
    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.toggled()))
    };
    let glide = |anchor: &'static str| {
        let runtime = runtime.clone();
        let menu = menu.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            menu.set(menu.followed());
            glide_to_anchor(runtime.as_ref(), anchor);
        })
    };
    let open = menu.is_open().then_some("is-open");

    html! {
        <nav ref={bar} class={classes!("nav", props.solid.then_some("is-solid"))}>
            <div class="container">
                <div class="nav-inner">
                    <a class="nav-item brand gradient-text" href="#home" onclick={glide("home")}>
                        {content::BRAND}
                    </a>
                    <div class="nav-links">
                        { for content::NAV_ITEMS.iter().map(|item| html! {
                            <a
                                class="nav-item nav-link"
                                href={format!("#{}", item.anchor)}
                                onclick={glide(item.anchor)}
                            >
                                {item.label}
                            </a>
                        }) }
                    </div>
                    <button
                        class={classes!("nav-item", "menu-toggle", open)}
                        type="button"
                        aria-label="Toggle menu"
                        aria-expanded={menu.is_open().to_string()}
                        onclick={toggle_menu}
                    >
                        <span class="menu-bar"></span>
                        <span class="menu-bar"></span>
                        <span class="menu-bar"></span>
                    </button>
                </div>
                <div class={classes!("mobile-menu", open)}>
                    { for content::NAV_ITEMS.iter().map(|item| html! {
                        <a
                            class="mobile-link"
                            href={format!("#{}", item.anchor)}
                            onclick={glide(item.anchor)}
                        >
                            {item.label}
                        </a>
                    }) }
                </div>
            </div>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub floaters: Rc<Vec<Particle>>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        let particles = props.floaters.clone();
        use_section(move |runtime| {
            let root = root.cast::<Element>()?;
            let letters = select_all(&root, ".name-letter");
            let title = select(&root, ".hero-title")?;
            let socials = select_all(&root, ".social-icon");
            let contact_info = select(&root, ".contact-info");
            let floaters = select_all(&root, ".hero-floater");

            let rig = HeroRig {
                root: runtime.adopt(&root)?,
                letters: runtime.adopt_all(&letters),
                title: runtime.adopt(&title)?,
                socials: runtime.adopt_all(&socials),
                contact_info: contact_info.and_then(|info| runtime.adopt(&info)),
                floaters: floaters
                    .iter()
                    .zip(particles.iter())
                    .filter_map(|(node, particle)| Some((runtime.adopt(node)?, particle.clone())))
                    .collect(),
            };
            Some(choreography::hero(&rig))
        });
    }

    html! {
        <section id="home" ref={root} class="hero">
            <div class="hero-floaters" aria-hidden="true">
                { for props.floaters.iter().map(|particle| html! {
                    <span class="hero-floater" style={particle_style(particle)}></span>
                }) }
            </div>
            <div class="hero-body">
                <h1 class="hero-name">{letters(content::OWNER, "name-letter", true)}</h1>
                <h2 class="hero-title">{content::ROLE}</h2>
                <div class="contact-info">
                    <p>{content::EMAIL}</p>
                    <p>{content::PHONE}</p>
                </div>
                <div class="socials">
                    { for content::SOCIAL_LINKS.iter().map(|link| html! {
                        <a
                            class="social-icon"
                            href={link.url}
                            target="_blank"
                            rel="noopener noreferrer"
                            title={link.name}
                            aria-label={link.name}
                        >
                            {link.icon}
                        </a>
                    }) }
                </div>
            </div>
            <div class="scroll-hint" aria-hidden="true"><span></span></div>
        </section>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        use_section(move |runtime| {
            let root = root.cast::<Element>()?;
            let heading = select(&root, ".section-heading")?;
            let text = select(&root, ".about-text")?;
            let lines = select_all(&text, ".text-line");
            let grid = select(&root, ".card-grid")?;
            let cards: Vec<CardNodes> = select_all(&grid, ".achievement-card")
                .into_iter()
                .map(CardNodes::find)
                .collect();

            let rig = AboutRig {
                root: runtime.adopt(&root)?,
                heading: heading_group(runtime, &heading)?,
                text: Group::new(runtime.adopt(&text)?, runtime.adopt_all(&lines)),
                cards: cards
                    .iter()
                    .filter_map(|card| card.adopt(runtime))
                    .collect(),
            };
            Some(choreography::about(&rig))
        });
    }

    html! {
        <section id="about" ref={root} class="section about">
            <div class="container two-columns">
                <div>
                    <h2 class="section-heading">{split_heading("About ", "Me")}</h2>
                    <div class="about-text">
                        { for content::summary_sentences().into_iter().map(|sentence| html! {
                            <p class="text-line">{sentence}</p>
                        }) }
                    </div>
                </div>
                <div class="card-grid achievements">
                    <h3 class="subheading gradient-text">{"Education"}</h3>
                    { for content::ACHIEVEMENTS.iter().map(|achievement| html! {
                        <div class="card achievement-card">
                            <div class="card-glow"></div>
                            <div class="card-content row">
                                <span class="card-icon">{achievement.icon}</span>
                                <div>
                                    <h4>{achievement.title}</h4>
                                    <p class="muted">{achievement.subtitle}</p>
                                    <p class="accent">{achievement.detail}</p>
                                </div>
                            </div>
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

fn project_card(project: &Project) -> Html {
    html! {
        <article class="card project-card">
            <div class="card-glow"></div>
            {card_particles(5)}
            <div class="card-media">
                <span class="card-image">{project.icon}</span>
            </div>
            <div class="card-content">
                <h3>{project.title}</h3>
                <p class="muted">{project.description}</p>
                <div class="tags">
                    { for project.tech.iter().map(|tech| html! {
                        <span class="card-tag">{*tech}</span>
                    }) }
                </div>
                <div class="card-actions">
                    <a class="card-button primary" href={project.live_url}>{"Live Demo"}</a>
                    <a class="card-button outline" href={project.code_url}>{"View Code"}</a>
                </div>
            </div>
        </article>
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        use_section(move |runtime| {
            deck_rig(runtime, &root, ".project-card").map(|rig| choreography::projects(&rig))
        });
    }

    html! {
        <section id="projects" ref={root} class="section projects">
            <div class="container">
                <h2 class="section-heading centered">{split_heading("Featured ", "Projects")}</h2>
                <div class="card-grid two-up">
                    { for content::PROJECTS.iter().map(project_card) }
                </div>
            </div>
        </section>
    }
}

fn skill_card(skill: &Skill) -> Html {
    html! {
        <div class="card skill-item">
            <div class="card-glow"></div>
            {card_particles(3)}
            <div class="card-content column">
                <span class="card-icon">{skill.icon}</span>
                <span class="card-label">{skill.name}</span>
            </div>
        </div>
    }
}

#[function_component(Skills)]
pub fn skills() -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        use_section(move |runtime| {
            deck_rig(runtime, &root, ".skill-item").map(|rig| choreography::skills(&rig))
        });
    }

    html! {
        <section id="skills" ref={root} class="section skills">
            <div class="container">
                <h2 class="section-heading centered">{split_heading("My ", "Skills")}</h2>
                <div class="card-grid skill-grid">
                    { for content::SKILLS.iter().map(skill_card) }
                </div>
                <div class="tools">
                    <h3 class="subheading">
                        {"Technologies & "}<span class="gradient-text">{"Tools"}</span>
                    </h3>
                    <div class="tool-list">
                        { for content::TOOLS.iter().map(|tool| html! {
                            <span class="tool-chip">{*tool}</span>
                        }) }
                    </div>
                </div>
            </div>
        </section>
    }
}

fn certification_card(certification: &Certification) -> Html {
    html! {
        <article class="card certification-card">
            <div class="card-glow"></div>
            <div class="card-content">
                <div class="row">
                    <span class="card-icon">{certification.icon}</span>
                    <div>
                        <h4>{certification.title}</h4>
                        <p class="muted">{certification.issuer}</p>
                        <p class="accent">{certification.date}</p>
                        <p class="small">{certification.description}</p>
                    </div>
                </div>
                { for certification.image.map(|image| html! {
                    <img
                        class="certificate"
                        src={image}
                        alt={format!("{} Certificate", certification.title)}
                        loading="lazy"
                    />
                }) }
            </div>
        </article>
    }
}

#[function_component(Certifications)]
pub fn certifications() -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        use_section(move |runtime| {
            deck_rig(runtime, &root, ".certification-card")
                .map(|rig| choreography::certifications(&rig))
        });
    }

    html! {
        <section id="certifications" ref={root} class="section certifications">
            <div class="container">
                <h2 class="section-heading centered">{split_heading("", "Certifications")}</h2>
                <div class="card-grid three-up">
                    { for content::CERTIFICATIONS.iter().map(certification_card) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ParticleBackgroundProps {
    pub dots: Rc<Vec<Particle>>,
    pub shapes: Rc<Vec<Particle>>,
}

#[function_component(ParticleBackground)]
pub fn particle_background(props: &ParticleBackgroundProps) -> Html {
    let root = use_node_ref();

    {
        let root = root.clone();
        let particles: Vec<Particle> =
            props.dots.iter().chain(props.shapes.iter()).cloned().collect();
        use_section(move |runtime| {
            let root = root.cast::<Element>()?;
            let nodes = select_all(&root, ".particle");
            let root = runtime.adopt(&root)?;
            let pieces: Vec<_> = nodes
                .iter()
                .zip(particles)
                .filter_map(|(node, particle)| Some((runtime.adopt(node)?, particle)))
                .collect();
            Some(choreography::particle_field(root, &pieces))
        });
    }

    html! {
        <div ref={root} class="particle-field" aria-hidden="true">
            { for props.dots.iter().map(|dot| html! {
                <span
                    class={classes!("particle", "dot", dot.large.then_some("large"))}
                    style={particle_style(dot)}
                ></span>
            }) }
            { for props.shapes.iter().map(|shape| html! {
                <span class="particle shape" style={particle_style(shape)}>
                    {shape.shape.map(String::from).unwrap_or_default()}
                </span>
            }) }
        </div>
    }
}
