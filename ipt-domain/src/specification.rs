/// 规约模式的核心 trait
///
/// 用于封装业务规则（例如“署名作者需具备姓与名”），使其可复用、可组合和可测试
pub trait Specification<T: ?Sized> {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> AndSpecification<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        AndSpecification {
            left: self,
            right: other,
        }
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> OrSpecification<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        OrSpecification {
            left: self,
            right: other,
        }
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> NotSpecification<Self>
    where
        Self: Sized,
    {
        NotSpecification { inner: self }
    }
}

impl<T: ?Sized> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// AND 组合规约：两个规约都满足时才满足
#[derive(Debug, Clone, Copy)]
pub struct AndSpecification<L, R> {
    left: L,
    right: R,
}

impl<T: ?Sized, L, R> Specification<T> for AndSpecification<L, R>
where
    L: Specification<T>,
    R: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}

/// OR 组合规约：任意一个规约满足即满足
#[derive(Debug, Clone, Copy)]
pub struct OrSpecification<L, R> {
    left: L,
    right: R,
}

impl<T: ?Sized, L, R> Specification<T> for OrSpecification<L, R>
where
    L: Specification<T>,
    R: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }
}

/// NOT 规约：内部规约不满足时才满足
#[derive(Debug, Clone, Copy)]
pub struct NotSpecification<S> {
    inner: S,
}

impl<T: ?Sized, S> Specification<T> for NotSpecification<S>
where
    S: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NonBlank;
    impl Specification<str> for NonBlank {
        fn is_satisfied_by(&self, candidate: &str) -> bool {
            !candidate.trim().is_empty()
        }
    }

    struct ShortLabel;
    impl Specification<str> for ShortLabel {
        fn is_satisfied_by(&self, candidate: &str) -> bool {
            candidate.len() <= 8
        }
    }

    #[test]
    fn test_and_specification() {
        let spec = NonBlank.and(ShortLabel);
        assert!(spec.is_satisfied_by("birds"));
        assert!(!spec.is_satisfied_by("   "));
        assert!(!spec.is_satisfied_by("a very long label"));
    }

    #[test]
    fn test_or_specification() {
        let spec = NonBlank.or(ShortLabel);
        assert!(spec.is_satisfied_by(" "));
        assert!(spec.is_satisfied_by("a very long label"));
        assert!(!spec.is_satisfied_by("                "));
    }

    #[test]
    fn test_not_specification() {
        let spec = NonBlank.not();
        assert!(spec.is_satisfied_by("  "));
        assert!(!spec.is_satisfied_by("fish"));
    }

    #[test]
    fn test_boxed_combination() {
        // (NonBlank AND NOT ShortLabel) OR (NOT NonBlank)
        let boxed: Box<dyn Specification<str>> = Box::new(NonBlank.and(ShortLabel.not()));
        let spec = boxed.or(NonBlank.not());
        assert!(spec.is_satisfied_by("a very long label"));
        assert!(spec.is_satisfied_by(""));
        assert!(!spec.is_satisfied_by("fish"));
    }
}
