//! Project catalog.
//!
//! The catalog is a static lookup table from project id to the descriptive
//! record shown in the project details overlay. It is built once at startup,
//! either from the built-in records or from a JSON file, and never mutated.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Pattern every project id must match (kebab-case slug).
const ID_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

/// Descriptive data for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Unique key referenced by project triggers on the page.
    pub id: String,
    /// Display title.
    pub title: String,
    /// When the project ran, e.g. "March 2025 - April 2025".
    pub period: String,
    /// Project category label.
    pub category: String,
    /// Overview paragraph.
    pub overview: String,
    /// Methodology paragraph, if the project has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    /// Results paragraph.
    pub results: String,
    /// Comma separated list of tools and frameworks.
    pub tech_stack: String,
    /// Ordered workflow steps, rendered as a list.
    #[serde(default)]
    pub workflow: Vec<String>,
}

/// An immutable, ordered collection of project records keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from records, validating ids and titles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogValidation`] if the catalog is empty, an id is
    /// not a kebab-case slug, an id appears twice, or a title is blank.
    pub fn new(records: Vec<ProjectRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::catalog_validation("catalog contains no projects"));
        }

        let id_re = Regex::new(ID_PATTERN)
            .map_err(|e| Error::catalog_validation(format!("bad id pattern: {e}")))?;

        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if !id_re.is_match(&record.id) {
                return Err(Error::catalog_validation(format!(
                    "project id '{}' is not a kebab-case slug",
                    record.id
                )));
            }
            if record.title.trim().is_empty() {
                return Err(Error::catalog_validation(format!(
                    "project '{}' has an empty title",
                    record.id
                )));
            }
            if index.insert(record.id.clone(), position).is_some() {
                return Err(Error::catalog_validation(format!(
                    "duplicate project id '{}'",
                    record.id
                )));
            }
        }

        Ok(Self { records, index })
    }

    /// The catalog compiled into the library.
    #[must_use]
    pub fn builtin() -> Self {
        let records = builtin_records();
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self { records, index }
    }

    /// Parse a catalog from a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the records fail validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<ProjectRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading catalog from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| Error::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<ProjectRecord> =
            serde_json::from_str(&text).map_err(|source| Error::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::new(records)?;

        info!(
            projects = catalog.len(),
            "Catalog loaded from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// Look up a record by id. Unknown ids yield `None`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Check whether a project id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate over records in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.records.iter()
    }

    /// All records in authoring order.
    #[must_use]
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn steps(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[allow(clippy::too_many_lines)]
fn builtin_records() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: "unieuro-forecasting".to_string(),
            title: "Unieuro Retail Sales Forecasting".to_string(),
            period: "March 2025 - April 2025".to_string(),
            category: "Sales Analytics & Machine Learning".to_string(),
            overview: "As part of a university-industry collaboration with Unieuro, I led the design and implementation of a predictive analytics system focused on sales forecasting for key product lines: washing machines, vacuum cleaners, and smartphones. The main objective was to provide actionable forecasts for business planning using real company data and advanced data science workflows.".to_string(),
            methodology: Some("Each model was evaluated using cross-validation and business-focused accuracy metrics (RMSE, MAE, R²) to determine the best performing approach for each product category. Dashboards emphasized intuitive exploration of trends, seasonality, promo effects, and enabled scenario-based planning.".to_string()),
            results: "Enabled the company to anticipate sales trends, optimize inventory, and align commercial strategies to seasonal and promotional patterns. Provided robust comparison between traditional regression, tree-based, and boosting approaches.".to_string(),
            tech_stack: "Python, Power BI, Machine Learning, Statistical Modeling".to_string(),
            workflow: steps(&[
                "Conducted extensive EDA, data cleaning, handled missing values, outlier detection, and data normalization",
                "Performed robust feature engineering, extracting meaningful attributes such as seasonal and promotional trends",
                "Developed, trained, and compared multiple ML models: Random Forest, Multiple Linear Regression, XGBoost, Gradient Boosting",
                "Designed and built interactive dashboards using Power BI for KPI visualization and business communication",
            ]),
        },
        ProjectRecord {
            id: "multi-agent-system".to_string(),
            title: "Multi-Agent System for Natural Language Civic Data Analysis".to_string(),
            period: "March 2025 - April 2025".to_string(),
            category: "AI & Natural Language Processing".to_string(),
            overview: "As part of a collaborative innovation project with Reply, I co-developed an AI-powered multi-agent system capable of answering natural language questions with real data analysis and visualizations, targeting public administration datasets. The central challenge was converting ambiguous user prompts into context-aware, reliable, and reproducible data-driven outputs.".to_string(),
            methodology: Some("The system uses document embedding and semantic parsing for robust query classification, moving beyond rigid keyword-matching. A unified pipeline translates user prompts into Python code, runs computations, and generates narrative answers via LLMs in a Streamlit interface with bilingual support (EN/IT).".to_string()),
            results: "Demonstrates how AI can democratize civic data access, making complex analytics self-service for non-technical stakeholders. Achieved reliable LLM outputs through structured prompts and semantic parsing, with significant improvements in speed and interpretability.".to_string(),
            tech_stack: "OpenAI GPT-4.1, Python, Streamlit, AI/NLP".to_string(),
            workflow: steps(&[
                "Conducted comprehensive data preprocessing across multiple civic datasets (type normalization, translation, schema alignment)",
                "Created modular pipeline architecture leveraging OpenAI Agent SDK (v4.1) and Llama-Index for intent parsing",
                "Implemented memory modules to recall user interactions and improve contextual understanding over time",
                "Developed automated statistical summaries and visual outputs triggered by natural language queries",
            ]),
        },
        ProjectRecord {
            id: "tv-movies-analysis".to_string(),
            title: "Analysis of TV Series and Movies Popularity".to_string(),
            period: "January 2024 - March 2024".to_string(),
            category: "Data Analysis & Predictive Modeling".to_string(),
            overview: "This project explored which features influence the popularity and ratings of global TV shows and movies using a Kaggle dataset. We aimed to determine whether factors such as genre, language, and episode duration could reliably predict a show's success through comprehensive data analysis and modeling.".to_string(),
            methodology: Some("Used Orange Data Mining for workflow implementation and visualization. Applied correlation analysis (Spearman) to identify key relationships, discretized popularity variables to create classification tasks, and employed both Test & Score and Predictions methods for model validation.".to_string()),
            results: "Found that popularity correlates more with show longevity (seasons/episodes) than genre or language alone. While models showed limitations due to dataset constraints, results provide foundation for marketing segmentation and platform strategy with richer external data.".to_string(),
            tech_stack: "SQL, Orange Data Mining, Python, Machine Learning".to_string(),
            workflow: steps(&[
                "Designed SQL queries to create focused datasets on ratings, genres, and spoken languages using SQLite",
                "Conducted extensive EDA examining distributions, correlations, and relationships between variables",
                "Implemented K-Means clustering to identify natural data groupings and association rule mining",
                "Applied multiple ML models: Decision Trees, Random Forest, Linear Regression for prediction tasks",
            ]),
        },
        ProjectRecord {
            id: "sdg7-energy-analysis".to_string(),
            title: "SDG7 Global Energy Analysis & Prediction".to_string(),
            period: "March 2024 - May 2024".to_string(),
            category: "Sustainability Analytics & Machine Learning".to_string(),
            overview: "Academic research project exploring global sustainable energy trends focusing on UN SDG7: ensuring access to affordable, reliable, sustainable, and modern energy for all. Combined descriptive analysis, correlation studies, and advanced predictive modeling using international datasets.".to_string(),
            methodology: Some("Used advanced data preprocessing including missing value imputation and StandardScaler normalization. Applied GridSearchCV for hyperparameter optimization and evaluated models using MSE and R-squared metrics. Created interactive dashboards for policy-ready insights.".to_string()),
            results: "Random Forest significantly outperformed linear regression (R²=0.89 vs 0.45), demonstrating the value of non-linear models for complex energy-economic relationships. Analysis revealed strong correlations between economic development, electrification, and sustainable investment patterns.".to_string(),
            tech_stack: "Python, Machine Learning, Data Visualization, Statistical Analysis".to_string(),
            workflow: steps(&[
                "Aggregated robust international data from World Bank, IEA, and UN on renewable energy, CO2 emissions, and electrification",
                "Created comprehensive time series visualizations and geospatial analysis for global energy trends",
                "Developed correlation matrix analysis to identify key relationships between energy variables and economic indicators",
                "Implemented Random Forest and Linear Regression models to predict primary energy consumption per capita",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            title: title.to_string(),
            period: "2024".to_string(),
            category: "Testing".to_string(),
            overview: "Overview".to_string(),
            methodology: None,
            results: "Results".to_string(),
            tech_stack: "Rust".to_string(),
            workflow: vec!["one".to_string(), "two".to_string()],
        }
    }

    #[test]
    fn test_builtin_has_four_projects() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
        for record in catalog.iter() {
            assert_eq!(record.workflow.len(), 4, "{} workflow", record.id);
        }
    }

    #[test]
    fn test_builtin_unieuro_lookup() {
        let catalog = Catalog::builtin();
        let record = catalog.get("unieuro-forecasting").unwrap();
        assert_eq!(record.title, "Unieuro Retail Sales Forecasting");
        assert_eq!(record.period, "March 2025 - April 2025");
        assert_eq!(record.workflow.len(), 4);
    }

    #[test]
    fn test_builtin_passes_validation() {
        let records = Catalog::builtin().records().to_vec();
        assert!(Catalog::new(records).is_ok());
    }

    #[test]
    fn test_unknown_id_is_none() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("no-such-project").is_none());
        assert!(!catalog.contains("no-such-project"));
    }

    #[test]
    fn test_order_is_preserved() {
        let catalog = Catalog::new(vec![record("b", "B"), record("a", "A")]).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = Catalog::new(Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no projects"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Catalog::new(vec![record("a", "A"), record("a", "Again")]).unwrap_err();
        assert!(err.to_string().contains("duplicate project id 'a'"));
    }

    #[test]
    fn test_rejects_bad_slug() {
        for bad in ["Has Space", "UPPER", "trailing-", "-leading", "double--dash", ""] {
            let result = Catalog::new(vec![record(bad, "Title")]);
            assert!(result.is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_rejects_blank_title() {
        let err = Catalog::new(vec![record("a", "   ")]).unwrap_err();
        assert!(err.to_string().contains("empty title"));
    }

    #[test]
    fn test_from_json_uses_camel_case_tech_stack() {
        let json = r#"[{
            "id": "demo",
            "title": "Demo",
            "period": "2024",
            "category": "Cat",
            "overview": "Over",
            "results": "Res",
            "techStack": "Rust, wasm",
            "workflow": ["a", "b", "c"]
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let record = catalog.get("demo").unwrap();
        assert_eq!(record.tech_stack, "Rust, wasm");
        assert!(record.methodology.is_none());
        assert_eq!(record.workflow, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serialize_skips_missing_methodology() {
        let json = serde_json::to_string(&record("a", "A")).unwrap();
        assert!(json.contains("techStack"));
        assert!(!json.contains("methodology"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let json = serde_json::to_string(&vec![record("from-file", "From File")]).unwrap();
        std::fs::write(&path, json).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.get("from-file").unwrap().title, "From File");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/projects.json").unwrap_err();
        assert!(matches!(err, Error::CatalogRead { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, Error::CatalogParse { .. }));
    }

    #[test]
    fn test_load_file_with_duplicate_ids_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let records = vec![record("same", "First"), record("same", "Second")];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, Error::CatalogValidation { .. }));
    }
}
