use crate::error::{CliqueError, CliqueResult};

/** search configuration */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// number of workers the candidate scan is split across (1: sequential)
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { workers }
    }
}

impl SearchConfig {
    /// configuration with a given number of workers (must be positive)
    pub fn with_workers(workers:usize) -> CliqueResult<Self> {
        if workers == 0 {
            return Err(CliqueError::Config("the number of workers must be positive".to_string()));
        }
        Ok(Self { workers })
    }

    /** reads the number of workers from a command line value.
    None gives the default (available hardware parallelism).
    */
    pub fn from_arg(workers:Option<&str>) -> CliqueResult<Self> {
        match workers {
            None => Ok(Self::default()),
            Some(s) => {
                let w = s.trim().parse::<usize>().map_err(|e| {
                    CliqueError::Config(format!("unable to parse the number of workers '{}': {}", s, e))
                })?;
                Self::with_workers(w)
            }
        }
    }
}
