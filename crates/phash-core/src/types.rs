use ndarray::Array2;

/// N×N grayscale luminance values in [0, 255], indexed by (row, col)
pub type IntensityMatrix = Array2<f64>;

/// DCT-II coefficients; (0, 0) is the DC term
pub type FrequencyMatrix = Array2<f64>;

/// 0/1 bitmap produced by binarizing a cropped band
pub type BitMatrix = Array2<u8>;
