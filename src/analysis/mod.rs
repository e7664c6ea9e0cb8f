mod crosstab;
mod statistics;
mod summary;

pub use crosstab::{CrossTab, PivotTable};
pub use statistics::{
    correlation_matrix, histogram, kde_curve, max, mean, min, pearson, quantile, std_dev,
    CorrelationMatrix, HistogramBins,
};
pub use summary::{
    describe, format_describe, CategoricalSummary, ColumnStats, ColumnSummary, NumericSummary,
};
