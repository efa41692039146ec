use crate::{CleanOutput, CleanerOptions, ContentCleaner};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn value_error(e: crate::Error) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

/// Cleaned text plus the statistics as a Python dict.
fn to_python(py: Python<'_>, output: CleanOutput) -> PyResult<(String, PyObject)> {
    let stats_json = output.stats.to_json().map_err(value_error)?;
    let json = PyModule::import(py, "json")?;
    let stats = json.call_method1("loads", (stats_json,))?;
    Ok((output.text, stats.unbind()))
}

#[pyclass(name = "Cleaner", frozen)]
struct PyCleaner {
    inner: ContentCleaner,
}

#[pymethods]
impl PyCleaner {
    #[new]
    #[pyo3(signature = (options_json=None))]
    fn new(options_json: Option<&str>) -> PyResult<Self> {
        let options = match options_json {
            Some(json) => CleanerOptions::from_json_str(json).map_err(value_error)?,
            None => CleanerOptions::default(),
        };
        let inner = ContentCleaner::new(options).map_err(value_error)?;
        Ok(Self { inner })
    }

    fn clean(&self, py: Python<'_>, text: &str) -> PyResult<(String, PyObject)> {
        let output = py.allow_threads(|| self.inner.clean(text));
        to_python(py, output)
    }

    fn clean_batch(&self, py: Python<'_>, texts: Vec<String>) -> PyResult<Vec<String>> {
        let outputs = py.allow_threads(|| self.inner.clean_batch(&texts));
        Ok(outputs.into_iter().map(|o| o.text).collect())
    }
}

#[pyfunction]
fn clean(py: Python<'_>, text: &str) -> PyResult<(String, PyObject)> {
    let output = py.allow_threads(|| crate::clean(text));
    to_python(py, output)
}

#[pyfunction]
fn normalize(text: &str) -> String {
    crate::normalize_text(text)
}

#[pymodule]
fn _mailscrub(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCleaner>()?;
    m.add_function(wrap_pyfunction!(clean, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;

    Ok(())
}
