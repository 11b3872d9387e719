//! Public portfolio sections.

use folio::content::{
    BlogPost, CONTACT_LINKS, ClientResult, CollectionKind, Entity, Project, RecordClient, Stored,
    Tech, copyright_notice, group_by_category,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, HttpRecords};
use crate::websocket::use_refetch_trigger;

/// Fetch a collection and refetch it whenever the server reports a change.
fn use_records<E: Entity>() -> ReadSignal<Option<ClientResult<Vec<Stored<E>>>>> {
    let (records, set_records) = signal(None);
    let refetch = use_refetch_trigger(E::COLLECTION);

    Effect::new(move |_| {
        refetch.track();
        spawn_local(async move {
            let result = HttpRecords::<E>::new().list().await;
            set_records.set(Some(result));
        });
    });

    records
}

/// Render a fetched list, or its loading/error/empty state.
fn section_body<E, V>(
    records: ReadSignal<Option<ClientResult<Vec<Stored<E>>>>>,
    empty: &'static str,
    render: impl Fn(Vec<Stored<E>>) -> V + Send + Sync + 'static,
) -> impl IntoView
where
    E: Entity,
    V: IntoView + 'static,
{
    move || match records.get() {
        None => view! { <p class="text-ctp-overlay0">"Loading..."</p> }.into_any(),
        Some(Err(e)) => {
            view! { <p class="text-ctp-red">"Error loading content: " {e.to_string()}</p> }.into_any()
        }
        Some(Ok(list)) if list.is_empty() => {
            view! { <p class="text-ctp-overlay0">{empty}</p> }.into_any()
        }
        Some(Ok(list)) => render(list).into_any(),
    }
}

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="container mx-auto px-6 py-8 space-y-16">
            <Hero/>
            <ProjectsSection/>
            <TechStackSection/>
            <BlogsSection/>
            <ResumeSection/>
        </div>
        <Footer/>
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <section id="home" class="py-16 text-center">
            <h2 class="text-5xl font-bold text-ctp-text mb-4">"Hi, I'm Purity"</h2>
            <p class="text-xl text-ctp-subtext0 mb-8">
                "Backend engineer building reliable services and the tools around them."
            </p>
            <div class="flex justify-center gap-4">
                <a href="#projects" class="px-6 py-3 bg-ctp-blue text-ctp-base rounded-lg font-medium hover:opacity-90">
                    "View Projects"
                </a>
                <a href="#resume" class="px-6 py-3 border border-ctp-surface2 text-ctp-text rounded-lg hover:border-ctp-blue">
                    "Resume"
                </a>
            </div>
        </section>
    }
}

#[component]
fn SectionHeading(title: &'static str) -> impl IntoView {
    view! { <h2 class="text-3xl font-bold text-ctp-text mb-6">{title}</h2> }
}

#[component]
fn ProjectsSection() -> impl IntoView {
    let projects = use_records::<Project>();

    view! {
        <section id="projects">
            <SectionHeading title="Projects"/>
            {section_body(projects, "No projects yet.", |list| {
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                        {list.into_iter().map(|stored| view! { <ProjectCard project=stored.record/> }).collect_view()}
                    </div>
                }
            })}
        </section>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    view! {
        <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-6 flex flex-col">
            <h3 class="text-xl font-semibold text-ctp-text mb-2">{project.title}</h3>
            <p class="text-ctp-subtext0 mb-4 flex-1">{project.description}</p>
            <div class="flex flex-wrap gap-2 mb-4">
                {project
                    .skills
                    .into_iter()
                    .map(|skill| {
                        view! {
                            <span class="text-xs bg-ctp-surface1 text-ctp-mauve px-2 py-1 rounded">
                                {skill}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="flex gap-4 text-sm">
                {project
                    .github_url
                    .map(|url| {
                        view! {
                            <a href=url target="_blank" rel="noopener noreferrer" class="text-ctp-blue hover:underline">
                                "GitHub"
                            </a>
                        }
                    })}
                {project
                    .live_url
                    .map(|url| {
                        view! {
                            <a href=url target="_blank" rel="noopener noreferrer" class="text-ctp-green hover:underline">
                                "Live Demo"
                            </a>
                        }
                    })}
            </div>
        </div>
    }
}

#[component]
fn TechStackSection() -> impl IntoView {
    let techs = use_records::<Tech>();

    view! {
        <section id="tech">
            <SectionHeading title="Tech Stack"/>
            {section_body(techs, "No technologies listed yet.", |list| {
                let groups = group_by_category(list.iter().map(|s| &s.record));
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        {groups
                            .into_iter()
                            .map(|(category, members)| {
                                view! {
                                    <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-4">
                                        <h3 class="text-lg font-semibold text-ctp-lavender mb-3">{category}</h3>
                                        <div class="flex flex-wrap gap-2">
                                            {members
                                                .into_iter()
                                                .map(|tech| {
                                                    view! {
                                                        <span class="bg-ctp-surface1 text-ctp-text px-3 py-1 rounded-full text-sm">
                                                            {tech.name}
                                                        </span>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })}
        </section>
    }
}

#[component]
fn BlogsSection() -> impl IntoView {
    let blogs = use_records::<BlogPost>();

    view! {
        <section id="blogs">
            <SectionHeading title="Blog"/>
            {section_body(blogs, "No blog posts yet.", |list| {
                view! {
                    <div class="space-y-4">
                        {list
                            .into_iter()
                            .map(|stored| {
                                let post = stored.record;
                                view! {
                                    <a
                                        href=post.url
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="block bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-4 hover:border-ctp-blue"
                                    >
                                        <h3 class="text-lg font-semibold text-ctp-text">{post.title}</h3>
                                        <p class="text-ctp-subtext0">{post.description}</p>
                                    </a>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })}
        </section>
    }
}

#[component]
fn ResumeSection() -> impl IntoView {
    let (resume_url, set_resume_url) = signal(None::<ClientResult<Option<String>>>);
    let refetch = use_refetch_trigger(CollectionKind::Resume);

    Effect::new(move |_| {
        refetch.track();
        spawn_local(async move {
            set_resume_url.set(Some(api::resume::url().await));
        });
    });

    view! {
        <section id="resume">
            <SectionHeading title="Resume"/>
            {move || match resume_url.get() {
                None => view! { <p class="text-ctp-overlay0">"Loading..."</p> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="text-ctp-red">"Error loading resume: " {e.to_string()}</p> }
                        .into_any()
                }
                Some(Ok(None)) => {
                    view! { <p class="text-ctp-overlay0">"No resume uploaded yet."</p> }.into_any()
                }
                Some(Ok(Some(url))) => {
                    view! {
                        <div class="space-y-4">
                            <a
                                href=url.clone()
                                download="resume.pdf"
                                class="inline-block px-6 py-3 bg-ctp-blue text-ctp-base rounded-lg font-medium hover:opacity-90"
                            >
                                "Download Resume"
                            </a>
                            <iframe
                                src=url
                                title="Resume"
                                class="w-full h-[800px] border border-ctp-surface1 rounded-lg"
                            ></iframe>
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let year = web_sys::js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="mt-16 border-t border-ctp-surface1 bg-ctp-surface0">
            <div class="container mx-auto px-6 py-16 flex flex-col items-center gap-6 text-center">
                <h2 class="text-4xl font-bold uppercase tracking-tight text-ctp-text">"Get in Touch"</h2>
                <p class="text-lg text-ctp-subtext0">
                    "Reach out for opportunities, collaborations, or just to talk backend."
                </p>
                <div class="flex flex-wrap justify-center gap-4 mt-2">
                    {CONTACT_LINKS
                        .iter()
                        .map(|link| {
                            let target = link.opens_new_tab().then_some("_blank");
                            let rel = link.opens_new_tab().then_some("noopener noreferrer");
                            view! {
                                <a
                                    href=link.href
                                    target=target
                                    rel=rel
                                    class="px-6 py-3 text-sm font-medium uppercase tracking-wider rounded transition-colors"
                                    class:bg-ctp-blue=link.primary
                                    class:text-ctp-base=link.primary
                                    class:border=!link.primary
                                    class:border-ctp-surface2=!link.primary
                                    class:text-ctp-text=!link.primary
                                >
                                    {link.label}
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class="border-t border-ctp-surface1 py-6 text-center text-sm text-ctp-subtext0">
                <p>{copyright_notice(year)}</p>
                <p class="mt-1 text-xs text-ctp-overlay0">"folio v" {env!("CARGO_PKG_VERSION")}</p>
            </div>
        </footer>
    }
}
