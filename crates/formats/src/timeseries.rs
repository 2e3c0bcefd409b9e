/// One time step of a region's series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesSample {
    pub timestamp: String,
    pub median: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Column-oriented series for one (region, scenario, variable), in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub timestamps: Vec<String>,
    pub medians: Vec<f64>,
    pub lower_bounds: Vec<f64>,
    pub upper_bounds: Vec<f64>,
}

const FIELDS_PER_ROW: usize = 4;

impl TimeSeries {
    /// Parses `date,median,lowerCI,upperCI` CSV text.
    ///
    /// The first line is a header. Rows without exactly four fields are
    /// dropped without error. Numeric fields keep their leading number and
    /// become NaN when they have none.
    pub fn from_csv(text: &str) -> Self {
        let mut out = TimeSeries::default();
        for line in text.split('\n').skip(1) {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != FIELDS_PER_ROW {
                continue;
            }
            out.timestamps.push(fields[0].trim().to_string());
            out.medians.push(parse_number(fields[1]));
            out.lower_bounds.push(parse_number(fields[2]));
            out.upper_bounds.push(parse_number(fields[3]));
        }
        out
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = TimeSeriesSample> + '_ {
        (0..self.len()).map(|i| TimeSeriesSample {
            timestamp: self.timestamps[i].clone(),
            median: self.medians[i],
            lower_bound: self.lower_bounds[i],
            upper_bound: self.upper_bounds[i],
        })
    }
}

/// Reads the longest numeric prefix (`"12.5mm"` is 12.5); NaN when there is none.
fn parse_number(field: &str) -> f64 {
    let text = field.trim();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::TimeSeries;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_only_four_field_rows() {
        let csv = "date,median,lowerCI,upperCI\n\
                   2020-01-01,10.5,8,12\n\
                   2021-01-01,11,9\n\
                   2022-01-01,12,10,14,99\n\
                   2023-01-01,13,11,15\n";
        let ts = TimeSeries::from_csv(csv);
        assert_eq!(ts.timestamps, vec!["2020-01-01", "2023-01-01"]);
        assert_eq!(ts.medians, vec![10.5, 13.0]);
        assert_eq!(ts.lower_bounds, vec![8.0, 11.0]);
        assert_eq!(ts.upper_bounds, vec![12.0, 15.0]);
    }

    #[test]
    fn header_only_yields_empty_columns() {
        let ts = TimeSeries::from_csv("date,median,lowerCI,upperCI\n");
        assert!(ts.is_empty());
        assert!(ts.medians.is_empty());
        assert!(ts.lower_bounds.is_empty());
        assert!(ts.upper_bounds.is_empty());
        assert!(TimeSeries::from_csv("").is_empty());
    }

    #[test]
    fn tolerates_crlf_and_keeps_source_order() {
        let csv = "date,median,lowerCI,upperCI\r\n2030-01-01,3,2,4\r\n2010-01-01,1,0,2\r\n";
        let ts = TimeSeries::from_csv(csv);
        let samples: Vec<_> = ts.samples().collect();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, "2030-01-01");
        assert_eq!(samples[0].upper_bound, 4.0);
        assert_eq!(samples[1].timestamp, "2010-01-01");
    }

    #[test]
    fn unparseable_number_is_kept_as_nan() {
        let ts = TimeSeries::from_csv("h\n2020-01-01,n/a,1,2\n");
        assert_eq!(ts.len(), 1);
        assert!(ts.medians[0].is_nan());
    }

    #[test]
    fn numeric_prefix_is_kept() {
        let csv = "h\n2020-01-01, 12.5mm ,-3e2x,.5\n2021-01-01,1e,+7.,-Infinity\n";
        let ts = TimeSeries::from_csv(csv);
        assert_eq!(ts.medians, vec![12.5, 1.0]);
        assert_eq!(ts.lower_bounds, vec![-300.0, 7.0]);
        assert_eq!(ts.upper_bounds, vec![0.5, f64::NEG_INFINITY]);
    }

    #[test]
    fn sign_or_dot_alone_is_nan() {
        let ts = TimeSeries::from_csv("h\n2020-01-01,-,.,e5\n");
        assert!(ts.medians[0].is_nan());
        assert!(ts.lower_bounds[0].is_nan());
        assert!(ts.upper_bounds[0].is_nan());
    }
}
